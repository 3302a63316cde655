//! Update discovery and self-update for the CircleCI CLI
//!
//! Provides:
//! - Version parsing, including Homebrew revision suffixes
//! - Latest-version discovery per distribution channel
//! - Update check scheduling
//! - Self-install from GitHub releases
//! - User-facing update messages

pub mod channel;
pub mod config;
pub mod error;
pub mod installer;
pub mod releases;
pub mod reporter;
pub mod result;
pub mod schedule;
pub mod strategy;
pub mod version;

pub use channel::Channel;
pub use config::UpdateConfig;
pub use error::{ConfigError, DiscoveryError, Error, InstallError, ParseError, Result};
pub use installer::install_latest;
pub use releases::{GitHubReleaseSource, ReleaseInfo, ReleaseSource, RepoSlug};
pub use reporter::{debug_version, how_to_update, report_version};
pub use result::UpdateResult;
pub use schedule::{should_check, UpdateCheckState, DEFAULT_CHECK_INTERVAL_HOURS};
pub use strategy::{check_for_updates, check_with, ChannelStrategy};
pub use version::{parse_revision_version, parse_version};

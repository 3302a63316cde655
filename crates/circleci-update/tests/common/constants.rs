//! Shared constants for test infrastructure

// Version constants
pub const VERSION_INSTALLED: &str = "0.1.1248";
pub const VERSION_LATEST: &str = "0.1.3923";
pub const VERSION_OLDER: &str = "0.1.3800";
pub const VERSION_AHEAD: &str = "0.2.0";
pub const VERSION_UNSET: &str = "0.0.0";

// Repository
pub const REPO_SLUG: &str = "CircleCI-Public/circleci-cli";
pub const RELEASES_PATH: &str = "/repos/CircleCI-Public/circleci-cli/releases";

// Homebrew
pub const FORMULA: &str = "circleci";
pub const MISSING_PROGRAM: &str = "circleci-test-no-such-brew";

// Target triple used in release fixtures
pub const TEST_TARGET: &str = "x86_64-unknown-linux-musl";

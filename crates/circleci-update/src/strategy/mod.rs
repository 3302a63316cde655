//! Channel strategies for discovering the latest version
//!
//! Each channel has one strategy that fills in `latest` and `found` on an
//! [`UpdateResult`]. A strategy either succeeds completely or returns an
//! error and leaves `found` false.

mod homebrew;
mod release;

pub use homebrew::{HomebrewFormula, HomebrewOutdated, HomebrewStrategy};
pub use release::ReleaseStrategy;

use std::sync::Arc;

use tracing::{debug, info};

use crate::channel::Channel;
use crate::config::UpdateConfig;
use crate::error::{DiscoveryError, Result};
use crate::releases::{GitHubReleaseSource, ReleaseSource};
use crate::result::UpdateResult;

/// Discovery procedure for one distribution channel
pub trait ChannelStrategy {
    /// Populate `result` with the latest version known to the channel
    fn discover(&self, result: &mut UpdateResult) -> std::result::Result<(), DiscoveryError>;
}

/// Strategy that discovers nothing, used for unrecognized channels
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiscovery;

impl ChannelStrategy for NoDiscovery {
    fn discover(&self, result: &mut UpdateResult) -> std::result::Result<(), DiscoveryError> {
        debug!("No update discovery for channel {}", result.channel());
        Ok(())
    }
}

/// Build the strategy for `channel` from configuration
pub fn strategy_for(
    channel: &Channel,
    config: &UpdateConfig,
) -> std::result::Result<Box<dyn ChannelStrategy>, DiscoveryError> {
    let strategy: Box<dyn ChannelStrategy> = match channel {
        Channel::Source | Channel::Release => {
            let source: Arc<dyn ReleaseSource> = Arc::new(GitHubReleaseSource::from_config(
                &config.github,
                &config.binary_name,
            ));
            Box::new(ReleaseStrategy::new(source, config.github.slug().parse()?))
        }
        Channel::Homebrew => Box::new(HomebrewStrategy::from_config(&config.homebrew)),
        Channel::Unknown(_) => Box::new(NoDiscovery),
    };
    Ok(strategy)
}

/// Check for updates of `current` on `channel` using configured strategies
pub fn check_for_updates(
    config: &UpdateConfig,
    current: &str,
    channel: Channel,
) -> Result<UpdateResult> {
    let strategy = strategy_for(&channel, config)?;
    check_with(strategy.as_ref(), current, channel)
}

/// Check for updates with an explicit strategy
pub fn check_with(
    strategy: &dyn ChannelStrategy,
    current: &str,
    channel: Channel,
) -> Result<UpdateResult> {
    let mut result = UpdateResult::new(current, channel)?;

    info!(
        "Checking for updates of {} on the {} channel",
        result.current(),
        result.channel()
    );
    strategy.discover(&mut result)?;

    match result.latest() {
        Some(latest) => debug!("Latest version: {}", latest.version),
        None => debug!("No release found"),
    }

    Ok(result)
}

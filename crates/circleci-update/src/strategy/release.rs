//! Release and source channels: discover through the release hosting API

use std::sync::Arc;

use tracing::{debug, warn};

use super::ChannelStrategy;
use crate::error::DiscoveryError;
use crate::releases::{ReleaseSource, RepoSlug};
use crate::result::UpdateResult;

/// Asks a [`ReleaseSource`] for the newest release of a repository
#[derive(Debug, Clone)]
pub struct ReleaseStrategy {
    source: Arc<dyn ReleaseSource>,
    slug: RepoSlug,
}

impl ReleaseStrategy {
    /// Create a strategy for `slug` using `source`
    pub fn new(source: Arc<dyn ReleaseSource>, slug: RepoSlug) -> Self {
        Self { source, slug }
    }

    /// Repository queried for releases
    pub fn slug(&self) -> &RepoSlug {
        &self.slug
    }
}

impl ChannelStrategy for ReleaseStrategy {
    fn discover(&self, result: &mut UpdateResult) -> Result<(), DiscoveryError> {
        debug!("Detecting latest release of {}", self.slug);

        let latest = self.source.detect_latest(&self.slug).map_err(|e| {
            warn!("Release lookup for {} failed: {}", self.slug, e);
            DiscoveryError::release_api(e)
        })?;

        result.record_latest(latest);
        result.attach_handle(Arc::clone(&self.source), self.slug.clone());
        Ok(())
    }
}

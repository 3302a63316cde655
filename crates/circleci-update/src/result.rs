//! Outcome of an update check

use std::sync::Arc;

use semver::Version;

use crate::channel::Channel;
use crate::error::ParseError;
use crate::releases::{ReleaseInfo, ReleaseSource, RepoSlug};
use crate::version::{is_unset, parse_version};

/// Everything known about available updates after a check
///
/// Created fresh for every check. Channel strategies fill in `latest` and
/// `found`; the reporter and installer read it afterwards.
#[derive(Debug, Clone)]
pub struct UpdateResult {
    current: Version,
    latest: Option<ReleaseInfo>,
    found: bool,
    channel: Channel,

    /// Discovery handle kept for installation
    handle: Option<Arc<dyn ReleaseSource>>,
    slug: Option<RepoSlug>,
}

impl UpdateResult {
    /// Start a check for the running `current` version on `channel`
    pub fn new(current: &str, channel: Channel) -> Result<Self, ParseError> {
        Ok(Self::with_version(parse_version(current)?, channel))
    }

    /// Start a check from an already parsed version
    pub fn with_version(current: Version, channel: Channel) -> Self {
        Self {
            current,
            latest: None,
            found: false,
            channel,
            handle: None,
            slug: None,
        }
    }

    /// Version of the running binary (or the package manager's installed version)
    pub fn current(&self) -> &Version {
        &self.current
    }

    /// Latest discovered release
    pub fn latest(&self) -> Option<&ReleaseInfo> {
        self.latest.as_ref()
    }

    /// Whether discovery found a release
    pub fn found(&self) -> bool {
        self.found
    }

    /// Channel this check runs against
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// True when the running version is exactly the latest known release.
    ///
    /// Nothing to compare (unset current or no release) counts as latest.
    /// Any other relation, including a local build newer than the latest
    /// release, is not latest.
    pub fn is_latest(&self) -> bool {
        if is_unset(&self.current) {
            return true;
        }

        match &self.latest {
            Some(latest) => latest.version == self.current,
            None => true,
        }
    }

    pub(crate) fn set_current(&mut self, current: Version) {
        self.current = current;
    }

    /// Record the outcome of a discovery
    pub(crate) fn record_latest(&mut self, latest: Option<ReleaseInfo>) {
        self.found = latest.is_some();
        self.latest = latest;
    }

    pub(crate) fn attach_handle(&mut self, handle: Arc<dyn ReleaseSource>, slug: RepoSlug) {
        self.handle = Some(handle);
        self.slug = Some(slug);
    }

    pub(crate) fn handle(&self) -> Option<(&Arc<dyn ReleaseSource>, &RepoSlug)> {
        self.handle.as_ref().zip(self.slug.as_ref())
    }
}

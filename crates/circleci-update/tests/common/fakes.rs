//! In-memory release sources
//!
//! Stand in for the GitHub API so strategies and the installer can be
//! exercised without the network.

use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use circleci_update::error::SourceError;
use circleci_update::{ReleaseInfo, ReleaseSource, RepoSlug};
use semver::Version;

/// Build a release with a fixed publish date
pub fn release(version: &str) -> ReleaseInfo {
    ReleaseInfo {
        version: Version::parse(version).unwrap(),
        tag: Some(format!("v{}", version)),
        published_at: Some(Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap()),
        name: Some(format!("v{}", version)),
        notes: None,
    }
}

/// What the fake should answer to `detect_latest`
#[derive(Debug, Clone)]
pub enum Detect {
    Latest(Option<ReleaseInfo>),
    RateLimited,
}

/// What the fake should answer to `update_self`
#[derive(Debug, Clone)]
pub enum Install {
    Succeed,
    Fail(&'static str),
}

/// Scripted [`ReleaseSource`]
#[derive(Debug)]
pub struct FakeReleaseSource {
    detect: Detect,
    install: Install,
    /// Slugs passed to `detect_latest`
    pub detect_calls: Mutex<Vec<String>>,
    /// `(current, target)` pairs passed to `update_self`
    pub install_calls: Mutex<Vec<(String, String)>>,
}

impl FakeReleaseSource {
    pub fn new(detect: Detect, install: Install) -> Self {
        Self {
            detect,
            install,
            detect_calls: Mutex::new(Vec::new()),
            install_calls: Mutex::new(Vec::new()),
        }
    }

    /// Source whose latest release is `version`
    pub fn with_latest(version: &str) -> Self {
        Self::new(Detect::Latest(Some(release(version))), Install::Succeed)
    }

    /// Source for a repository without releases
    pub fn empty() -> Self {
        Self::new(Detect::Latest(None), Install::Succeed)
    }

    /// Source that fails like a rate-limited API
    pub fn rate_limited() -> Self {
        Self::new(Detect::RateLimited, Install::Succeed)
    }
}

impl ReleaseSource for FakeReleaseSource {
    fn detect_latest(&self, slug: &RepoSlug) -> Result<Option<ReleaseInfo>, SourceError> {
        self.detect_calls.lock().unwrap().push(slug.to_string());
        match &self.detect {
            Detect::Latest(latest) => Ok(latest.clone()),
            Detect::RateLimited => Err(
                "api request failed with status: 403 Forbidden - API rate limit exceeded".into(),
            ),
        }
    }

    fn update_self(
        &self,
        current: &Version,
        _slug: &RepoSlug,
        release: &ReleaseInfo,
    ) -> Result<Version, SourceError> {
        self.install_calls
            .lock()
            .unwrap()
            .push((current.to_string(), release.version.to_string()));
        match &self.install {
            Install::Succeed => Ok(release.version.clone()),
            Install::Fail(reason) => Err((*reason).into()),
        }
    }
}

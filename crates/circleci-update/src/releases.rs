//! GitHub releases discovery and installation
//!
//! [`ReleaseSource`] is the discovery handle used by the release and source
//! channels. [`GitHubReleaseSource`] implements it with the `self_update`
//! crate; tests substitute their own implementations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use semver::Version;
use self_update::backends::github;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::error::{DiscoveryError, SourceError};
use crate::version::parse_version;

/// A published release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Release version
    pub version: Version,

    /// Tag the release was published under, when read from a release host
    pub tag: Option<String>,

    /// Publish timestamp, when the host reports one
    pub published_at: Option<DateTime<Utc>>,

    /// Release name
    pub name: Option<String>,

    /// Release notes
    pub notes: Option<String>,
}

impl ReleaseInfo {
    /// Release with only a version (as reported by package managers)
    pub fn from_version(version: Version) -> Self {
        Self {
            version,
            tag: None,
            published_at: None,
            name: None,
            notes: None,
        }
    }
}

/// `owner/name` identifier of a release repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoSlug {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.trim().is_empty() && !name.trim().is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.trim().to_string(),
                    name: name.trim().to_string(),
                })
            }
            _ => Err(DiscoveryError::invalid_slug(s)),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Release as returned by `GET /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, Deserialize)]
struct GitHubRelease {
    tag_name: String,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    body: Option<String>,

    #[serde(default)]
    draft: bool,

    #[serde(default)]
    prerelease: bool,

    #[serde(default)]
    published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    assets: Vec<GitHubAsset>,
}

#[derive(Debug, Clone, Deserialize)]
struct GitHubAsset {
    name: String,
}

/// Error body returned by the GitHub API
#[derive(Debug, Deserialize)]
struct GitHubApiMessage {
    message: String,
}

/// Releases requested per page
const RELEASES_PER_PAGE: u32 = 100;

/// Release hosting API used to discover and install releases
pub trait ReleaseSource: fmt::Debug + Send + Sync {
    /// Newest release of `slug`, or `None` when the repository has none
    fn detect_latest(&self, slug: &RepoSlug) -> Result<Option<ReleaseInfo>, SourceError>;

    /// Replace the running binary with `release`, returning the installed version
    fn update_self(
        &self,
        current: &Version,
        slug: &RepoSlug,
        release: &ReleaseInfo,
    ) -> Result<Version, SourceError>;
}

/// [`ReleaseSource`] backed by the GitHub releases API
#[derive(Debug, Clone)]
pub struct GitHubReleaseSource {
    /// API base URL, without trailing slash
    api_url: String,

    /// Token for authenticated requests
    token: Option<String>,

    /// Binary name inside release archives
    bin_name: String,

    /// Target triple used to select release assets
    target: String,

    /// Show a download progress bar while installing
    show_progress: bool,
}

impl GitHubReleaseSource {
    /// Create a source for the given API base URL
    pub fn new(api_url: impl Into<String>, bin_name: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
            bin_name: bin_name.into(),
            target: self_update::get_target().to_string(),
            show_progress: false,
        }
    }

    /// Create a source from configuration
    pub fn from_config(config: &GitHubConfig, bin_name: &str) -> Self {
        let mut source = Self::new(config.api_url.as_str(), bin_name);
        if let Some(token) = &config.token {
            source = source.with_token(token.as_str());
        }
        source
    }

    /// Authenticate requests with a token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the target triple
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Enable or disable the download progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Published, non-prerelease releases carrying an asset for our target
    fn fetch_releases(&self, slug: &RepoSlug) -> Result<Vec<ReleaseInfo>, SourceError> {
        let url = format!(
            "{}/repos/{}/{}/releases?per_page={}",
            self.api_url,
            slug.owner(),
            slug.name(),
            RELEASES_PER_PAGE
        );

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("circleci-update/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut request = client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!("Listing releases from: {}", url);
        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<GitHubApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or(body);
            return Err(format!(
                "api request failed with status: {} - for: {:?}: {}",
                status, url, message
            )
            .into());
        }

        let releases: Vec<GitHubRelease> = response.json()?;

        let releases = releases
            .into_iter()
            .filter(|release| !release.draft && !release.prerelease)
            .filter(|release| {
                release
                    .assets
                    .iter()
                    .any(|asset| asset.name.contains(&self.target))
            })
            .filter_map(|release| {
                let version = parse_version(&release.tag_name).ok()?;
                // Semver pre-release tags are excluded even when not flagged on GitHub
                if !version.pre.is_empty() {
                    return None;
                }
                Some(ReleaseInfo {
                    version,
                    tag: Some(release.tag_name),
                    published_at: release.published_at,
                    name: release.name.filter(|n| !n.is_empty()),
                    notes: release.body,
                })
            })
            .collect();

        Ok(releases)
    }
}

impl ReleaseSource for GitHubReleaseSource {
    fn detect_latest(&self, slug: &RepoSlug) -> Result<Option<ReleaseInfo>, SourceError> {
        debug!("Fetching releases for {} from {}", slug, self.api_url);

        let releases = self.fetch_releases(slug)?;
        debug!("Found {} releases for target {}", releases.len(), self.target);

        let latest = releases
            .into_iter()
            .max_by(|a, b| a.version.cmp(&b.version));

        Ok(latest)
    }

    fn update_self(
        &self,
        current: &Version,
        slug: &RepoSlug,
        release: &ReleaseInfo,
    ) -> Result<Version, SourceError> {
        info!("Installing {} {} over {}", self.bin_name, release.version, current);

        let current = current.to_string();
        // Releases not read from the API fall back to the tag format the CLI publishes under
        let tag = release
            .tag
            .clone()
            .unwrap_or_else(|| format!("v{}", release.version));
        debug!("Requesting release tag {}", tag);

        let mut builder = github::Update::configure();
        builder
            .repo_owner(slug.owner())
            .repo_name(slug.name())
            .bin_name(&self.bin_name)
            .target(&self.target)
            .current_version(&current)
            .target_version_tag(&tag)
            .with_url(&self.api_url)
            .show_download_progress(self.show_progress)
            .show_output(false)
            .no_confirm(true);

        if let Some(token) = &self.token {
            builder.auth_token(token);
        }

        let status = builder.build()?.update()?;
        let installed = parse_version(status.version())?;

        info!("Installed {} {}", self.bin_name, installed);
        Ok(installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_parsing() {
        let slug: RepoSlug = "CircleCI-Public/circleci-cli".parse().unwrap();
        assert_eq!(slug.owner(), "CircleCI-Public");
        assert_eq!(slug.name(), "circleci-cli");
        assert_eq!(slug.to_string(), "CircleCI-Public/circleci-cli");
    }

    #[test]
    fn test_invalid_slugs() {
        for raw in ["", "circleci-cli", "/circleci-cli", "owner/", "a/b/c"] {
            let err = raw.parse::<RepoSlug>().unwrap_err();
            assert!(
                matches!(err, DiscoveryError::InvalidSlug { .. }),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_api_url_trailing_slash_is_trimmed() {
        let source = GitHubReleaseSource::new("https://github.example.com/api/v3/", "circleci");
        assert_eq!(source.api_url(), "https://github.example.com/api/v3");
    }

    #[test]
    fn test_from_config_uses_token() {
        let config = GitHubConfig {
            token: Some("ghp_secret".to_string()),
            ..GitHubConfig::default()
        };
        let source = GitHubReleaseSource::from_config(&config, "circleci");
        assert_eq!(source.token.as_deref(), Some("ghp_secret"));
        assert_eq!(source.api_url(), "https://api.github.com");
    }

    #[test]
    fn test_release_keeps_publish_time_and_tag() {
        let json = r#"{
            "tag_name": "0.1.3923",
            "name": "",
            "draft": false,
            "prerelease": false,
            "created_at": "2026-09-01T10:00:00Z",
            "published_at": "2026-09-01T10:05:00Z",
            "assets": [{"name": "circleci-cli_0.1.3923_x86_64-unknown-linux-musl.tar.gz"}]
        }"#;
        let release: GitHubRelease = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "0.1.3923");
        assert_eq!(
            release.published_at.unwrap().to_rfc3339(),
            "2026-09-01T10:05:00+00:00"
        );
        assert_eq!(release.assets.len(), 1);
    }
}

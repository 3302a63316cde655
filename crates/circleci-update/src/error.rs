//! Error types for circleci-update

use std::process::ExitStatus;

use thiserror::Error;

use crate::channel::Channel;

/// Result type alias using circleci-update's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by release sources
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Remediation shown when the release API cannot be queried.
///
/// Unauthenticated GitHub requests are rate limited, which is by far the most
/// common way this call fails.
pub const RATE_LIMIT_HELP: &str = "\
This is most likely due to GitHub rate-limiting on unauthenticated requests.

To have the circleci-cli make authenticated requests please:

  1. Generate a token at https://github.com/settings/tokens
  2. Set the token by either adding it to your ~/.gitconfig or
     setting the GITHUB_TOKEN environment variable.

Instructions for generating a token can be found at:
https://help.github.com/articles/creating-a-personal-access-token-for-the-command-line/

We call the GitHub releases API to look for new releases.
More information about that API can be found here: https://developer.github.com/v3/repos/releases/";

/// A version string that is not valid semver
#[derive(Error, Debug)]
#[error("failed to parse version from {raw:?}: {source}")]
pub struct ParseError {
    /// The string exactly as it was supplied
    pub raw: String,

    #[source]
    pub source: semver::Error,
}

/// Failures while discovering the latest version of a channel
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The release API query failed (transport error, rate limit, bad response)
    #[error("Failed to query the GitHub API for updates: {source}\n\n{}", RATE_LIMIT_HELP)]
    ReleaseApi {
        #[source]
        source: SourceError,
    },

    /// Repository slug is not of the form `owner/name`
    #[error("Invalid repository slug {slug:?}: expected `owner/name`")]
    InvalidSlug { slug: String },

    /// The package manager executable is not on PATH
    #[error("Expected to find `{program}` in your $PATH but wasn't able to find it")]
    PackageManagerNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    /// The package manager could not be started
    #[error("failed to run `{program} outdated --json=v2`")]
    PackageManagerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The package manager ran but reported failure
    #[error("failed to check for updates. `{program} outdated --json=v2` returned an error ({status}): {stderr}")]
    PackageManagerFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The package manager's JSON could not be decoded
    #[error("failed to parse output of `{program} outdated --json=v2`")]
    MalformedOutput {
        program: String,
        #[source]
        source: serde_json::Error,
    },

    /// A version reported by the channel is not valid
    #[error(transparent)]
    InvalidVersion(#[from] ParseError),
}

impl DiscoveryError {
    /// Create a release API error from any underlying cause
    pub fn release_api(source: impl Into<SourceError>) -> Self {
        Self::ReleaseApi {
            source: source.into(),
        }
    }

    /// Create an invalid slug error
    pub fn invalid_slug(slug: impl Into<String>) -> Self {
        Self::InvalidSlug { slug: slug.into() }
    }
}

/// Failures while replacing the running binary
#[derive(Error, Debug)]
pub enum InstallError {
    /// The channel is managed elsewhere (e.g. by a package manager)
    #[error("self-install is not supported for the {channel} channel")]
    Unsupported { channel: Channel },

    /// No release was discovered, so there is nothing to install
    #[error("no release was found to install")]
    NothingToInstall,

    /// Download, verification or replacement failed
    #[error("failed to install update: {source}")]
    Failed {
        #[source]
        source: SourceError,
    },
}

impl InstallError {
    /// Wrap an installation failure
    pub fn failed(source: impl Into<SourceError>) -> Self {
        Self::Failed {
            source: source.into(),
        }
    }
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A setting has an unusable value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Top-level error for update checks
#[derive(Error, Debug)]
pub enum Error {
    /// Current version could not be parsed
    #[error("Failed to parse current version: {0}")]
    Parse(#[from] ParseError),

    /// Latest version discovery failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Installation failed
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

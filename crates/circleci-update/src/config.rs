//! Update configuration with layered precedence
//!
//! Configuration is resolved with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. Config file (`<config dir>/update.yml`)
//! 3. Environment variables
//! 4. CLI flags (handled by caller)

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::schedule::DEFAULT_CHECK_INTERVAL_HOURS;

/// File name of the optional config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "update.yml";

/// Settings used while checking for and installing updates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateConfig {
    /// Release hosting settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Package manager settings
    #[serde(default)]
    pub homebrew: HomebrewConfig,

    /// Hours between automatic update checks
    #[serde(default = "default_check_interval")]
    pub check_interval_hours: u32,

    /// Name of the installed binary
    #[serde(default = "default_binary_name")]
    pub binary_name: String,

    /// Page users are pointed to when they built from source
    #[serde(default = "default_releases_page")]
    pub releases_page: String,
}

/// GitHub releases configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Base URL for the GitHub API (GitHub Enterprise hosts differ)
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Repository owner
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Repository name
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Token for authenticated requests
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

/// Homebrew configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HomebrewConfig {
    /// Executable looked up on PATH
    #[serde(default = "default_brew_program")]
    pub program: String,

    /// Formula name to look for in `brew outdated`
    #[serde(default = "default_formula")]
    pub formula: String,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            homebrew: HomebrewConfig::default(),
            check_interval_hours: default_check_interval(),
            binary_name: default_binary_name(),
            releases_page: default_releases_page(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            token: None,
        }
    }
}

impl Default for HomebrewConfig {
    fn default() -> Self {
        Self {
            program: default_brew_program(),
            formula: default_formula(),
        }
    }
}

fn default_check_interval() -> u32 {
    DEFAULT_CHECK_INTERVAL_HOURS
}
fn default_binary_name() -> String {
    "circleci".to_string()
}
fn default_releases_page() -> String {
    "https://github.com/CircleCI-Public/circleci-cli/releases".to_string()
}
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_repo_owner() -> String {
    "CircleCI-Public".to_string()
}
fn default_repo_name() -> String {
    "circleci-cli".to_string()
}
fn default_brew_program() -> String {
    "brew".to_string()
}
fn default_formula() -> String {
    "circleci".to_string()
}

impl GitHubConfig {
    /// `owner/name` slug of the release repository
    pub fn slug(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }
}

impl UpdateConfig {
    /// Load configuration from `config_dir` and the process environment
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);

        let config = if path.exists() {
            debug!("Loading update config from {:?}", path);
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| env::var(key).ok())
    }

    /// Parse a YAML document, filling unspecified settings with defaults
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CIRCLECI_GITHUB_API_URL") {
            self.github.api_url = val;
        }

        if let Some(val) = lookup("CIRCLECI_UPDATE_CHECK_HOURS") {
            self.check_interval_hours = val.trim().parse().map_err(|_| {
                ConfigError::invalid_value(
                    "CIRCLECI_UPDATE_CHECK_HOURS",
                    "must be a whole number of hours",
                )
            })?;
        }

        if let Some(val) = lookup("CIRCLECI_BREW_PROGRAM") {
            self.homebrew.program = val;
        }

        if let Some(token) = lookup("GITHUB_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.github.token = Some(token);
        }

        Ok(self)
    }
}

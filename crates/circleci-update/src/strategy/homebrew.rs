//! Homebrew channel: discover through `brew outdated --json=v2`

use std::process::Command;

use serde::Deserialize;
use tracing::{debug, info};

use super::ChannelStrategy;
use crate::config::HomebrewConfig;
use crate::error::DiscoveryError;
use crate::releases::ReleaseInfo;
use crate::result::UpdateResult;
use crate::version::parse_revision_version;

/// Output of `brew outdated --json=v2`
///
/// ```json
/// {
///   "formulae": [
///     {
///       "name": "circleci",
///       "installed_versions": ["0.1.1248"],
///       "current_version": "0.1.3923",
///       "pinned": false,
///       "pinned_version": null
///     }
///   ],
///   "casks": []
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomebrewOutdated {
    #[serde(default)]
    pub formulae: Vec<HomebrewFormula>,

    #[serde(default)]
    pub casks: Vec<serde_json::Value>,
}

/// One outdated formula
#[derive(Debug, Clone, Deserialize)]
pub struct HomebrewFormula {
    pub name: String,

    /// Locally installed versions, may be empty
    #[serde(default)]
    pub installed_versions: Vec<String>,

    /// Newest version available upstream (Homebrew's "current")
    pub current_version: String,

    #[serde(default)]
    pub pinned: bool,

    #[serde(default)]
    pub pinned_version: Option<String>,
}

impl HomebrewOutdated {
    /// Decode the JSON document printed by brew
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Entry for `formula`, if brew reports it as outdated
    pub fn find(&self, formula: &str) -> Option<&HomebrewFormula> {
        self.formulae.iter().find(|f| f.name == formula)
    }
}

/// Queries Homebrew for the newest version of a formula
#[derive(Debug, Clone)]
pub struct HomebrewStrategy {
    program: String,
    formula: String,
}

impl HomebrewStrategy {
    /// Create a strategy that runs `program` and looks for `formula`
    pub fn new(program: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            formula: formula.into(),
        }
    }

    /// Create a strategy from configuration
    pub fn from_config(config: &HomebrewConfig) -> Self {
        Self::new(config.program.as_str(), config.formula.as_str())
    }

    /// Formula looked up in brew's output
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Run brew and decode its report
    fn outdated(&self) -> Result<HomebrewOutdated, DiscoveryError> {
        let brew = which::which(&self.program).map_err(|source| {
            DiscoveryError::PackageManagerNotFound {
                program: self.program.clone(),
                source,
            }
        })?;

        debug!("Running {:?} outdated --json=v2", brew);

        let output = Command::new(&brew)
            .args(["outdated", "--json=v2"])
            .output()
            .map_err(|source| DiscoveryError::PackageManagerSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DiscoveryError::PackageManagerFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        HomebrewOutdated::from_json(&output.stdout).map_err(|source| {
            DiscoveryError::MalformedOutput {
                program: self.program.clone(),
                source,
            }
        })
    }

    /// Apply brew's report to `result`.
    ///
    /// Brew's installed version replaces `current` when reported. No matching
    /// formula means we are up to date as far as brew knows, which is not an
    /// error.
    pub fn apply(
        &self,
        outdated: &HomebrewOutdated,
        result: &mut UpdateResult,
    ) -> Result<(), DiscoveryError> {
        let Some(formula) = outdated.find(&self.formula) else {
            debug!("{} is not listed as outdated", self.formula);
            return Ok(());
        };

        // Both versions must parse before `result` is touched
        let installed = formula
            .installed_versions
            .first()
            .map(|raw| parse_revision_version(raw))
            .transpose()?;
        let latest = parse_revision_version(&formula.current_version)?;

        if formula.pinned {
            info!(
                "{} is pinned at {}",
                formula.name,
                formula.pinned_version.as_deref().unwrap_or("an older version")
            );
        }

        if let Some(installed) = installed {
            result.set_current(installed);
        }
        result.record_latest(Some(ReleaseInfo::from_version(latest)));
        Ok(())
    }
}

impl ChannelStrategy for HomebrewStrategy {
    fn discover(&self, result: &mut UpdateResult) -> Result<(), DiscoveryError> {
        let outdated = self.outdated()?;
        self.apply(&outdated, result)
    }
}

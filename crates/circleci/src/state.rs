//! Persisted update check state
//!
//! Stored as `update_check.yml` in the config directory. Missing or
//! unreadable state is treated as "never checked".

use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use circleci_update::UpdateCheckState;
use tracing::{debug, warn};

/// File name of the state file inside the config directory
pub const STATE_FILE_NAME: &str = "update_check.yml";

/// Location of the state file
pub fn state_path(config_dir: &Utf8Path) -> Utf8PathBuf {
    config_dir.join(STATE_FILE_NAME)
}

/// Load the last check state, falling back to an empty state
pub fn load(config_dir: &Utf8Path) -> UpdateCheckState {
    let path = state_path(config_dir);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No update check state at {}: {}", path, e);
            return UpdateCheckState::default();
        }
    };

    serde_yaml_ng::from_str(&content).unwrap_or_else(|e| {
        warn!("Ignoring unreadable update check state {}: {}", path, e);
        UpdateCheckState::default()
    })
}

/// Record that a check finished at `checked_at`
pub fn save(config_dir: &Utf8Path, checked_at: DateTime<Utc>) -> Result<()> {
    fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create config directory {}", config_dir))?;

    let state = UpdateCheckState {
        last_update_check: Some(checked_at),
    };
    let path = state_path(config_dir);
    let content = serde_yaml_ng::to_string(&state).context("Failed to serialize update check state")?;

    fs::write(&path, content).with_context(|| format!("Failed to write {}", path))?;
    debug!("Saved update check state to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_missing_state_is_never_checked() {
        let dir = TempDir::new().unwrap();
        let state = load(&utf8_dir(&dir));
        assert!(state.last_update_check.is_none());
        assert!(state.is_due(28));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let config_dir = utf8_dir(&dir).join("nested");
        let checked_at = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();

        save(&config_dir, checked_at).unwrap();

        assert_eq!(load(&config_dir).last_update_check, Some(checked_at));
    }

    #[test]
    fn test_recent_save_is_not_due() {
        let dir = TempDir::new().unwrap();
        save(&utf8_dir(&dir), Utc::now()).unwrap();
        assert!(!load(&utf8_dir(&dir)).is_due(28));
    }

    #[test]
    fn test_corrupt_state_is_ignored() {
        let dir = TempDir::new().unwrap();
        let config_dir = utf8_dir(&dir);
        fs::write(state_path(&config_dir), "last_update_check: [not a date").unwrap();

        assert!(load(&config_dir).last_update_check.is_none());
    }
}

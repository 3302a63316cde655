//! Update check scheduling

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Default hours between update checks.
///
/// Just over a day, so a daily user is not prompted on every run but still
/// hears about new releases.
pub const DEFAULT_CHECK_INTERVAL_HOURS: u32 = 28;

/// Whether at least `threshold_hours` have passed since `last_check`
pub fn should_check(last_check: DateTime<Utc>, threshold_hours: u32) -> bool {
    should_check_at(last_check, Utc::now(), threshold_hours)
}

/// [`should_check`] against an explicit `now`
pub fn should_check_at(last_check: DateTime<Utc>, now: DateTime<Utc>, threshold_hours: u32) -> bool {
    now.signed_duration_since(last_check) >= TimeDelta::hours(i64::from(threshold_hours))
}

/// When the last update check happened
///
/// Persisted by the caller between runs; this crate only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCheckState {
    /// Time of the last successful check
    #[serde(default)]
    pub last_update_check: Option<DateTime<Utc>>,
}

impl UpdateCheckState {
    /// Whether a new check is due; always true if no check was recorded
    pub fn is_due(&self, threshold_hours: u32) -> bool {
        self.last_update_check
            .is_none_or(|last| should_check(last, threshold_hours))
    }
}

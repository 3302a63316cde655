//! Human-facing messages about an update check

use crate::channel::Channel;
use crate::config::UpdateConfig;
use crate::result::UpdateResult;

/// Multi-line dump of the check, meant for stderr while debugging
pub fn debug_version(result: &UpdateResult) -> String {
    let latest = result
        .latest()
        .map(|l| l.version.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let published = result
        .latest()
        .and_then(|l| l.published_at)
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());

    [
        format!("Latest version: {}", latest),
        format!("Published: {}", published),
        format!("Current Version: {}", result.current()),
    ]
    .join("\n")
}

/// Notice telling the user a new release exists
pub fn report_version(result: &UpdateResult) -> String {
    let mut lines = vec![format!("You are running {}", result.current())];

    if let Some(latest) = result.latest() {
        lines.push(format!("A new release is available ({})", latest.version));
    }

    lines.join("\n")
}

/// How to upgrade on the result's channel; empty for unknown channels
pub fn how_to_update(result: &UpdateResult, config: &UpdateConfig) -> String {
    match result.channel() {
        Channel::Homebrew => format!(
            "You can update with `brew upgrade {}`",
            config.homebrew.formula
        ),
        Channel::Release => format!(
            "You can update with `{} update install`",
            config.binary_name
        ),
        Channel::Source => [
            "You can visit the Github releases page for the CLI to manually download and install:",
            config.releases_page.as_str(),
        ]
        .join("\n"),
        Channel::Unknown(_) => String::new(),
    }
}

//! Replace the running binary with the latest release

use tracing::info;

use crate::error::InstallError;
use crate::result::UpdateResult;

/// Install the release discovered by a release-channel check.
///
/// Only results produced by the release or source channels carry the
/// discovery handle needed to download the release. Package manager
/// installs must be upgraded through the package manager.
pub fn install_latest(result: &UpdateResult) -> Result<String, InstallError> {
    if !result.channel().supports_self_install() {
        return Err(InstallError::Unsupported {
            channel: result.channel().clone(),
        });
    }

    let latest = match result.latest() {
        Some(latest) if result.found() => latest,
        _ => return Err(InstallError::NothingToInstall),
    };

    let (source, slug) = result.handle().ok_or(InstallError::NothingToInstall)?;

    info!("Installing {} from {}", latest.version, slug);
    let installed = source
        .update_self(result.current(), slug, latest)
        .map_err(InstallError::failed)?;

    Ok(format!("Updated to {}", installed))
}

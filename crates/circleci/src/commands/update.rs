//! Update command

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use chrono::Utc;
use circleci_update::{
    check_for_updates, debug_version, how_to_update, install_latest, report_version, Channel,
    UpdateConfig, UpdateResult,
};
use tracing::{debug, info};

use crate::cli::{UpdateArgs, UpdateCheckArgs, UpdateCommands, UpdateInstallArgs};
use crate::commands::version::VERSION;
use crate::output;
use crate::state;

pub fn run(args: UpdateArgs, config_dir: &Utf8Path) -> Result<()> {
    let config = UpdateConfig::load(config_dir.as_std_path())
        .with_context(|| format!("Failed to load update settings from {}", config_dir))?;

    match args.command {
        UpdateCommands::Check(args) => check(args, &config, config_dir),
        UpdateCommands::Install(args) => install(args, &config),
    }
}

/// Check for updates, honouring the check interval unless forced
fn check(args: UpdateCheckArgs, config: &UpdateConfig, config_dir: &Utf8Path) -> Result<()> {
    let last = state::load(config_dir);
    if !args.force && !last.is_due(config.check_interval_hours) {
        info!(
            "Skipping update check, last check was at {:?}",
            last.last_update_check
        );
        output::info("Already checked for updates recently (use --force to check again)");
        return Ok(());
    }

    let result = discover(&args.channel, config)?;
    state::save(config_dir, Utc::now())?;

    if args.debug {
        output::detail(&debug_version(&result));
    }

    if result.is_latest() {
        output::success("Already up-to-date.");
        return Ok(());
    }

    output::info(&report_version(&result));
    let instructions = how_to_update(&result, config);
    if !instructions.is_empty() {
        output::plain(&instructions);
    }

    Ok(())
}

/// Replace this binary with the latest release
fn install(args: UpdateInstallArgs, config: &UpdateConfig) -> Result<()> {
    let result = discover(&args.channel, config)?;

    if args.debug {
        output::detail(&debug_version(&result));
    }

    if result.is_latest() {
        output::success("Already up-to-date.");
        return Ok(());
    }

    if !result.channel().supports_self_install() {
        output::warning(&format!(
            "This CLI was installed through {}, which manages its updates",
            result.channel()
        ));
        let instructions = how_to_update(&result, config);
        if !instructions.is_empty() {
            output::plain(&instructions);
        }
        bail!("Self-update is not available for the {} channel", result.channel());
    }

    let spinner = output::spinner("Installing the latest release...");
    let installed = install_latest(&result);
    spinner.finish_and_clear();

    output::success(&installed?);
    Ok(())
}

fn discover(channel: &str, config: &UpdateConfig) -> Result<UpdateResult> {
    let channel = Channel::from(channel);
    debug!("Running {} from the {} channel", VERSION, channel);

    let spinner = output::spinner("Checking for updates...");
    let result = check_for_updates(config, VERSION, channel);
    spinner.finish_and_clear();

    Ok(result?)
}

//! CLI argument parsing with clap

use anyhow::{anyhow, Result};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Channel this build was packaged for, set by the release pipeline
pub const PACKAGE_MANAGER: &str = match option_env!("CIRCLECI_PACKAGE_MANAGER") {
    Some(channel) => channel,
    None => "release",
};

/// CircleCI command line interface
#[derive(Parser, Debug)]
#[command(name = "circleci")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding update settings and state (default: ~/.circleci)
    #[arg(long, global = true, env = "CIRCLECI_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config directory from the flag, falling back to `~/.circleci`
    pub fn resolve_config_dir(&self) -> Result<Utf8PathBuf> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }

        let base = directories::BaseDirs::new()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(base.home_dir().to_path_buf())
            .map_err(|p| anyhow!("Home directory is not valid UTF-8: {:?}", p))?;

        Ok(home.join(".circleci"))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Check for and install CLI updates
    Update(UpdateArgs),
}

// Update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(subcommand)]
    pub command: UpdateCommands,
}

#[derive(Subcommand, Debug)]
pub enum UpdateCommands {
    /// Check if there are any updates available
    Check(UpdateCheckArgs),

    /// Update the tool to the latest version
    Install(UpdateInstallArgs),
}

#[derive(Args, Debug)]
pub struct UpdateCheckArgs {
    /// How this CLI was installed (release, source, homebrew)
    #[arg(long, default_value = PACKAGE_MANAGER)]
    pub channel: String,

    /// Check even if the last check was recent
    #[arg(short, long)]
    pub force: bool,

    /// Print details about the discovered release
    #[arg(long)]
    pub debug: bool,
}

#[derive(Args, Debug)]
pub struct UpdateInstallArgs {
    /// How this CLI was installed (release, source, homebrew)
    #[arg(long, default_value = PACKAGE_MANAGER)]
    pub channel: String,

    /// Print details about the discovered release
    #[arg(long)]
    pub debug: bool,
}

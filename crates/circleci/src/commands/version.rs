//! Version command

use anyhow::Result;

/// Version of this build
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    println!("{}", VERSION);
    Ok(())
}

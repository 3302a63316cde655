//! Terminal output utilities

use std::sync::atomic::{AtomicBool, Ordering};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Set by `--quiet`; suppresses everything except warnings and errors
static QUIET: AtomicBool = AtomicBool::new(false);

/// Enable or disable quiet mode
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Whether non-error output is suppressed
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a success message
pub fn success(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print an unadorned line
pub fn plain(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{}", msg);
}

/// Print debugging detail to stderr
pub fn detail(msg: &str) {
    eprintln!("{}", style(msg).dim());
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

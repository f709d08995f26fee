//! Output formatting
//!
//! Status prefixes, user-facing error display, and the tracing-subscriber
//! setup shared by the binary and its tests.

use tracing::Level;

use crate::error::MxstageError;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Log level derived from the --verbose / --quiet flags
pub fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Initialize the tracing subscriber
pub fn init_tracing(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(verbose, quiet).into()),
        )
        .init();
}

/// Print the final success line, unless --quiet suppresses it
pub fn display_success(quiet: bool) {
    if !quiet {
        println!("{} staging complete", status::SUCCESS);
    }
}

/// Print a fatal error to stderr
pub fn display_error(err: &MxstageError) {
    eprintln!("{} {err}", status::ERROR);
}

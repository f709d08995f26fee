//! mxstage CLI - buildpack staging orchestrator
//!
//! Entry point for the mxstage command-line application.

use anyhow::Result;
use clap::Parser;

use mxstage::cli::output::{self, display_error};
use mxstage::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    output::init_tracing(cli.verbose, quiet);

    // Any fatal condition exits non-zero; there is no partial-success exit.
    match cli.run().await {
        Ok(()) => {
            output::display_success(quiet);
            Ok(())
        }
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}

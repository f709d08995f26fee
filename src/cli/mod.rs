//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::Environment;
use crate::core::orchestrator::Orchestrator;
use crate::error::MxstageError;

/// mxstage - buildpack staging orchestrator for Mendix runtime applications
///
/// Prepares the runtime environment for an application package inside an
/// ephemeral build container and hands the staged tree to the platform
/// launcher.
#[derive(Parser, Debug)]
#[command(name = "mxstage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build directory to classify, build, and stage
    pub build_dir: PathBuf,

    /// Persistent cache directory shared across builds
    pub cache_dir: PathBuf,

    /// Buildpack root holding static resources (defaults to the executable's directory)
    #[arg(long, env = "BUILDPACK_DIR")]
    pub buildpack_dir: Option<PathBuf>,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the staging run
    pub async fn run(self) -> Result<(), MxstageError> {
        let env = Environment::from_env();
        let buildpack_dir = self.buildpack_dir.unwrap_or_else(default_buildpack_dir);

        let orchestrator =
            Orchestrator::new(self.build_dir, &self.cache_dir, buildpack_dir, &env);
        orchestrator.run().await
    }
}

/// Buildpack root when none is given: the directory holding the executable
fn default_buildpack_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

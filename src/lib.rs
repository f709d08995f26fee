//! mxstage - buildpack staging orchestrator for Mendix runtime applications
//!
//! This library implements the compile/staging phase of a buildpack: it
//! classifies the build input, provisions external toolchains, invokes the
//! mxbuild model compiler when raw sources are present, and stages the final
//! directory tree handed to the platform launcher.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (classification, preflight, orchestration)
//! - [`infra`] - Infrastructure layer (network, filesystem, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

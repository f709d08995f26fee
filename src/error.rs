//! Error types for mxstage
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Preflight configuration errors
///
/// Missing required configuration is accumulated and reported as one batch,
/// so the operator sees every problem after a single failed staging attempt.
#[derive(Error, Debug)]
pub enum PreflightError {
    /// One or more required configuration values are absent
    #[error("Missing required configuration:\n{}", missing.iter().map(|m| format!("  - {m}")).collect::<Vec<_>>().join("\n"))]
    MissingConfiguration { missing: Vec<String> },
}

/// Build input classification errors
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// More than one project file at the top level of the build directory
    #[error("Found {count} project (.mpr) files in the build directory; expected exactly one")]
    AmbiguousProjectFile { count: usize },

    /// Deployment metadata file is absent
    #[error("Deployment metadata not found at '{path}'")]
    MetadataMissing { path: PathBuf },

    /// Deployment metadata is not valid JSON
    #[error("Failed to parse deployment metadata '{path}': {error}")]
    MetadataParse { path: PathBuf, error: String },

    /// Deployment metadata lacks the runtime version field
    #[error("Deployment metadata '{path}' has no '{field}' field")]
    MetadataFieldMissing { path: PathBuf, field: String },

    /// Extracted version string does not parse
    #[error("Could not parse runtime version '{version}': {error}")]
    VersionParse { version: String, error: String },

    /// Project database could not be read
    #[error("Could not extract the product version from '{path}': {error}")]
    VersionUnreadable { path: PathBuf, error: String },

    /// IO error while scanning the build directory
    #[error("Failed to scan build directory '{path}': {error}")]
    ScanFailed { path: PathBuf, error: String },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Server responded with a failure status
    #[error("Download of '{url}' failed with HTTP {status}")]
    Http { url: String, status: u16 },

    /// Transport-level failure
    #[error("Network error downloading '{url}': {error}")]
    Network { url: String, error: String },

    /// IO error while writing the downloaded file
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// URL has no usable trailing path segment to derive a file name from
    #[error("Cannot derive a file name from URL '{url}'")]
    BadUrl { url: String },
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum UnpackError {
    /// File-name suffix matches no known archive container format
    #[error("Unknown archive format: '{file}'")]
    UnknownFormat { file: String },

    /// Extraction tool exited with a non-zero status
    #[error("'{tool}' failed with exit status {status}")]
    ToolFailed { tool: String, status: i32 },

    /// Extraction tool could not be started
    #[error("Failed to run '{tool}': {error}")]
    ToolSpawn { tool: String, error: String },
}

/// External compiler (mxbuild) errors
#[derive(Error, Debug)]
pub enum CompileError {
    /// mxbuild exited with a non-zero status
    #[error("mxbuild failed with exit status {status}")]
    CompilerFailed { status: i32 },

    /// mxbuild (or its mono host) could not be started
    #[error("Failed to start the model compiler: {error}")]
    Spawn { error: String },

    /// mxbuild reported success but the deployment package is missing
    #[error("Compiler output package not found at '{path}'")]
    OutputMissing { path: PathBuf },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove a file or directory
    #[error("Failed to remove '{path}': {error}")]
    Remove { path: PathBuf, error: String },

    /// Failed to list a directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Failed to copy a file or directory tree
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to create a symbolic link
    #[error("Failed to link '{link}' -> '{target}': {error}")]
    Symlink {
        link: PathBuf,
        target: PathBuf,
        error: String,
    },
}

/// Top-level mxstage error type
#[derive(Error, Debug)]
pub enum MxstageError {
    /// Preflight error
    #[error("Preflight check failed: {0}")]
    Preflight(#[from] PreflightError),

    /// Classification error
    #[error("Build input error: {0}")]
    Classify(#[from] ClassifyError),

    /// Download error
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Unpack error
    #[error("Unpack error: {0}")]
    Unpack(#[from] UnpackError),

    /// Compiler error
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}

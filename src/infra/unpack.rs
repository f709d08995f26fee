//! Archive extraction
//!
//! Dispatches purely on the file-name suffix to the matching external
//! extraction tool. An unrecognized suffix is fatal and nothing is touched
//! on disk before the dispatch decision.

use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::UnpackError;

/// Extract a toolchain or runtime archive into `dest`
///
/// Supported container formats, by suffix:
/// - `.deb` via `dpkg-deb -x`
/// - `.tar.gz` / `.tgz` via `tar -xzf`
pub async fn unpack(archive: &Path, dest: &Path) -> Result<(), UnpackError> {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if name.ends_with(".deb") {
        run_tool("dpkg-deb", &["-x"], archive, dest, None).await
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        run_tool("tar", &["-xzf"], archive, dest, Some("-C")).await
    } else {
        Err(UnpackError::UnknownFormat { file: name })
    }
}

/// Extract a deployment package (zip container) over `dest`
pub async fn unpack_mda(archive: &Path, dest: &Path) -> Result<(), UnpackError> {
    run_tool("unzip", &["-o", "-q"], archive, dest, Some("-d")).await
}

/// Run an extraction tool as `tool {flags} {archive} [{dest_flag}] {dest}`
///
/// The destination directory is created first; a non-zero exit status from
/// the tool fails the whole build.
async fn run_tool(
    tool: &str,
    flags: &[&str],
    archive: &Path,
    dest: &Path,
    dest_flag: Option<&str>,
) -> Result<(), UnpackError> {
    tokio::fs::create_dir_all(dest)
        .await
        .map_err(|e| UnpackError::ToolSpawn {
            tool: tool.to_string(),
            error: format!("cannot create '{}': {e}", dest.display()),
        })?;

    let mut cmd = Command::new(tool);
    cmd.args(flags).arg(archive);
    if let Some(flag) = dest_flag {
        cmd.arg(flag);
    }
    cmd.arg(dest);

    debug!(tool, archive = %archive.display(), dest = %dest.display(), "extracting archive");

    let output = cmd.output().await.map_err(|e| UnpackError::ToolSpawn {
        tool: tool.to_string(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            warn!(tool, %stderr, "extraction tool reported errors");
        }
        return Err(UnpackError::ToolFailed {
            tool: tool.to_string(),
            status: output.status.code().unwrap_or(-1),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::process::Command as StdCommand;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_unpack_unknown_suffix_is_fatal() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("runtime.rar");
        std::fs::write(&archive, b"not an archive").unwrap();
        let dest = temp.path().join("out");

        let result = unpack(&archive, &dest).await;
        match result.unwrap_err() {
            UnpackError::UnknownFormat { file } => assert_eq!(file, "runtime.rar"),
            e => panic!("Expected UnknownFormat, got: {e:?}"),
        }

        // Dispatch failed before any filesystem mutation.
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_unpack_tarball() {
        let temp = TempDir::new().unwrap();

        let payload_dir = temp.path().join("payload");
        std::fs::create_dir_all(payload_dir.join("bin")).unwrap();
        std::fs::write(payload_dir.join("bin/runtime"), b"#!/bin/sh\n").unwrap();

        let archive = temp.path().join("mendix-7.1.0.tar.gz");
        let status = StdCommand::new("tar")
            .args(["-czf"])
            .arg(&archive)
            .args(["-C"])
            .arg(&payload_dir)
            .arg(".")
            .status()
            .expect("tar must be available");
        assert!(status.success());

        let dest = temp.path().join("runtimes");
        unpack(&archive, &dest).await.unwrap();

        assert!(dest.join("bin/runtime").exists());
    }

    #[tokio::test]
    async fn test_unpack_corrupt_tarball_propagates_tool_failure() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.tar.gz");
        std::fs::write(&archive, b"definitely not gzip").unwrap();

        let result = unpack(&archive, &temp.path().join("out")).await;
        match result.unwrap_err() {
            UnpackError::ToolFailed { tool, status } => {
                assert_eq!(tool, "tar");
                assert_ne!(status, 0);
            }
            e => panic!("Expected ToolFailed, got: {e:?}"),
        }
    }

    proptest! {
        /// Any suffix outside the two known container formats is rejected
        /// with UnknownFormat, never silently extracted.
        #[test]
        fn prop_unknown_suffixes_rejected(ext in "[a-z0-9]{1,8}") {
            prop_assume!(ext != "deb" && ext != "tgz" && ext != "gz");

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let temp = TempDir::new().unwrap();
            let archive = temp.path().join(format!("archive.{ext}"));
            std::fs::write(&archive, b"x").unwrap();

            let result = rt.block_on(unpack(&archive, &temp.path().join("out")));
            prop_assert!(
                matches!(result, Err(UnpackError::UnknownFormat { .. })),
                "expected UnknownFormat, got {:?}",
                result
            );
        }
    }
}

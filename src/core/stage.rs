//! Staged directory tree construction
//!
//! Both input branches converge on the same layout: a fixed directory
//! skeleton under the build root, the runtime under `runtimes/`, and the
//! buildpack's static resources copied into place. There is no rollback;
//! on failure the platform discards the whole build attempt.

use std::path::Path;
use tracing::{debug, info};

use crate::config::defaults;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Create the fixed directory skeleton under the build root
pub fn create_skeleton(build_dir: &Path) -> Result<(), FilesystemError> {
    for dir in defaults::SKELETON_DIRS {
        filesystem::create_dir_all(&build_dir.join(dir))?;
    }
    Ok(())
}

/// Remove every top-level entry of the build directory except the
/// local-tools directory
///
/// Runs after a successful compile, just before the deployment package is
/// extracted over the emptied directory. From here on a source build is
/// indistinguishable from a precompiled package.
pub fn clear_build_dir(build_dir: &Path) -> Result<(), FilesystemError> {
    let entries = std::fs::read_dir(build_dir).map_err(|e| FilesystemError::ReadDir {
        path: build_dir.to_path_buf(),
        error: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: build_dir.to_path_buf(),
            error: e.to_string(),
        })?;

        if entry.file_name() == defaults::LOCAL_DIR {
            continue;
        }
        filesystem::remove_path(&entry.path())?;
    }

    debug!(build_dir = %build_dir.display(), "cleared build directory");
    Ok(())
}

/// Copy the buildpack's static resources into the staged tree
///
/// - `.local/bin/java` symlink to `java_exe`, only when that binary exists;
///   the JDK is provisioned by source builds only, and a precompiled package
///   must not be staged with a dangling link
/// - `.local/m2ee.yaml` runtime process configuration
/// - `start.sh` launcher script at the build root
/// - `lib/` shared library directory
/// - `newrelic/` telemetry agent, only when a license key is configured
pub fn stage_static_resources(
    build_dir: &Path,
    buildpack_dir: &Path,
    java_exe: &Path,
    telemetry_enabled: bool,
) -> Result<(), FilesystemError> {
    let local = build_dir.join(defaults::LOCAL_DIR);

    if java_exe.exists() {
        filesystem::symlink(java_exe, &local.join("bin/java"))?;
    }

    filesystem::copy_file(
        &buildpack_dir.join(defaults::M2EE_CONFIG),
        &local.join(defaults::M2EE_CONFIG),
    )?;
    filesystem::copy_file(
        &buildpack_dir.join(defaults::LAUNCHER_SCRIPT),
        &build_dir.join(defaults::LAUNCHER_SCRIPT),
    )?;
    filesystem::copy_dir_all(
        &buildpack_dir.join(defaults::LIB_DIR),
        &build_dir.join(defaults::LIB_DIR),
    )?;

    if telemetry_enabled {
        info!("license key configured, staging telemetry agent");
        filesystem::copy_dir_all(
            &buildpack_dir.join(defaults::TELEMETRY_DIR),
            &build_dir.join(defaults::TELEMETRY_DIR),
        )?;
    }

    Ok(())
}

//! External model compiler invocation
//!
//! mxbuild is a Windows-targeted binary; on the Linux build host it runs
//! under the mono compatibility layer. The compiler gets an explicit output
//! package path and Java paths into the freshly unpacked SDK, plus the
//! project file as its single positional argument.

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

use crate::config::defaults;
use crate::error::CompileError;

/// mxbuild invocation wrapper
#[derive(Debug)]
pub struct ModelCompiler {
    /// mono binary hosting the compiler
    mono: PathBuf,
    /// mxbuild entry point
    mxbuild: PathBuf,
    /// JVM installation handed to the compiler
    java_home: PathBuf,
    /// Deployment package the compiler writes
    output: PathBuf,
}

impl ModelCompiler {
    /// Compiler wired to the fixed toolchain locations
    pub fn new() -> Self {
        Self::with_paths(
            Path::new(defaults::MONO_DIR).join(defaults::MONO_EXE),
            Path::new(defaults::MXBUILD_DIR).join(defaults::MXBUILD_EXE),
            Path::new(defaults::JDK_DIR).join(defaults::JDK_HOME_SUBDIR),
            PathBuf::from(defaults::MODEL_PACKAGE),
        )
    }

    /// Compiler with explicit paths
    pub fn with_paths(mono: PathBuf, mxbuild: PathBuf, java_home: PathBuf, output: PathBuf) -> Self {
        Self {
            mono,
            mxbuild,
            java_home,
            output,
        }
    }

    /// Path of the deployment package the compiler writes
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Arguments passed to mono, in order
    ///
    /// `loose_version_check` is set when a forced mxbuild URL is in use and
    /// the model may be converted to the toolchain's version.
    pub fn args(&self, project_file: &Path, loose_version_check: bool) -> Vec<String> {
        let mut args = vec![
            self.mxbuild.display().to_string(),
            "--target=package".to_string(),
            format!("--output={}", self.output.display()),
            format!("--java-home={}", self.java_home.display()),
            format!("--java-exe-path={}", self.java_home.join("bin/java").display()),
        ];

        if loose_version_check {
            args.push("--loose-version-check".to_string());
        }

        args.push(project_file.display().to_string());
        args
    }

    /// Compile the project into a deployment package
    ///
    /// # Returns
    /// Path of the package on success. A non-zero compiler exit fails the
    /// whole build; no partial output is trusted.
    pub async fn compile(
        &self,
        project_file: &Path,
        loose_version_check: bool,
    ) -> Result<PathBuf, CompileError> {
        info!(project = %project_file.display(), "compiling project model");

        let status = Command::new(&self.mono)
            .args(self.args(project_file, loose_version_check))
            .status()
            .await
            .map_err(|e| CompileError::Spawn {
                error: e.to_string(),
            })?;

        if !status.success() {
            return Err(CompileError::CompilerFailed {
                status: status.code().unwrap_or(-1),
            });
        }

        if !self.output.exists() {
            return Err(CompileError::OutputMissing {
                path: self.output.clone(),
            });
        }

        Ok(self.output.clone())
    }
}

impl Default for ModelCompiler {
    fn default() -> Self {
        Self::new()
    }
}

//! Build orchestrator
//!
//! Top-level state machine of the staging pipeline:
//! preflight -> classify -> [source build] -> stage -> done.
//! Any failure in any phase aborts the whole run; a partially staged build
//! directory is never handed to the launcher because the terminal phase is
//! only reached after every staging step succeeds.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{defaults, urls, Environment};
use crate::core::{classify, preflight, stage};
use crate::core::classify::BuildInput;
use crate::error::MxstageError;
use crate::infra::cache::ArtifactCache;
use crate::infra::compiler::ModelCompiler;
use crate::infra::unpack;

/// Pipeline phase, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preflight,
    Classify,
    SourceBuild,
    Stage,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Preflight => "preflight",
            Phase::Classify => "classify",
            Phase::SourceBuild => "source-build",
            Phase::Stage => "stage",
            Phase::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// How the mxbuild toolchain archive is fetched
#[derive(Debug, PartialEq, Eq)]
struct MxbuildFetch {
    url: String,
    use_cache: bool,
    loose_version_check: bool,
}

/// Resolve the mxbuild archive for this build
///
/// A forced URL bypasses the persistent cache and relaxes the compiler's
/// match between model version and toolchain version; otherwise the archive
/// is pinned to the model's runtime version and cached.
fn mxbuild_fetch(env: &Environment, runtime_version: &semver::Version) -> MxbuildFetch {
    match &env.mxbuild_url_override {
        Some(url) => MxbuildFetch {
            url: url.clone(),
            use_cache: false,
            loose_version_check: true,
        },
        None => MxbuildFetch {
            url: urls::mxbuild(&env.blobstore, runtime_version),
            use_cache: true,
            loose_version_check: false,
        },
    }
}

/// Drives one staging run from preflight to completion
pub struct Orchestrator<'a> {
    /// Build directory being staged
    build_dir: PathBuf,
    /// Buildpack root holding static resources
    buildpack_dir: PathBuf,
    /// Archive cache on the persistent cache volume
    cache: ArtifactCache,
    /// External model compiler
    compiler: ModelCompiler,
    /// External configuration snapshot
    env: &'a Environment,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator for one build
    pub fn new(build_dir: PathBuf, cache_dir: &Path, buildpack_dir: PathBuf, env: &'a Environment) -> Self {
        Self {
            build_dir,
            buildpack_dir,
            cache: ArtifactCache::new(cache_dir),
            compiler: ModelCompiler::new(),
            env,
        }
    }

    /// Orchestrator with an explicit cache and compiler
    pub fn with_parts(
        build_dir: PathBuf,
        buildpack_dir: PathBuf,
        cache: ArtifactCache,
        compiler: ModelCompiler,
        env: &'a Environment,
    ) -> Self {
        Self {
            build_dir,
            buildpack_dir,
            cache,
            compiler,
            env,
        }
    }

    /// Run the whole pipeline
    pub async fn run(&self) -> Result<(), MxstageError> {
        info!(phase = %Phase::Preflight, "checking required configuration");
        preflight::check(self.env)?;

        info!(phase = %Phase::Classify, build_dir = %self.build_dir.display(), "inspecting build input");
        let input = classify::classify(&self.build_dir)?;
        info!(runtime_version = %input.runtime_version(), "detected runtime version");

        if let BuildInput::Source { project_file, runtime_version } = &input {
            info!(phase = %Phase::SourceBuild, project = %project_file.display(), "building from sources");
            self.build_from_source(project_file, runtime_version).await?;
        }

        info!(phase = %Phase::Stage, "staging runtime and resources");
        self.stage(&input).await?;

        let cache_info = self.cache.info();
        info!(
            phase = %Phase::Done,
            cached_archives = cache_info.item_count,
            fetches = self.cache.fetch_count(),
            "staging complete"
        );
        Ok(())
    }

    /// Provision the compiler-host toolchains, compile, and converge the
    /// build directory onto the deployment-package layout
    async fn build_from_source(
        &self,
        project_file: &Path,
        runtime_version: &semver::Version,
    ) -> Result<(), MxstageError> {
        let blobstore = &self.env.blobstore;

        self.provision(&urls::jdk(blobstore), Path::new(defaults::JDK_DIR), true)
            .await?;
        self.provision(&urls::mono(blobstore), Path::new(defaults::MONO_DIR), true)
            .await?;

        let fetch = mxbuild_fetch(self.env, runtime_version);
        if fetch.loose_version_check {
            warn!(
                url = %fetch.url,
                "forced mxbuild in use; the model will be converted to that toolchain's version"
            );
        }
        self.provision(&fetch.url, Path::new(defaults::MXBUILD_DIR), fetch.use_cache)
            .await?;

        let package = self
            .compiler
            .compile(project_file, fetch.loose_version_check)
            .await?;

        // Convergence point: from here on a source build looks exactly like
        // a precompiled package.
        stage::clear_build_dir(&self.build_dir)?;
        unpack::unpack_mda(&package, &self.build_dir).await?;

        Ok(())
    }

    /// Create the staged tree: skeleton, runtime archive, static resources
    async fn stage(&self, input: &BuildInput) -> Result<(), MxstageError> {
        stage::create_skeleton(&self.build_dir)?;

        let (runtime_url, use_cache) = match &self.env.runtime_url_override {
            Some(url) => (url.clone(), false),
            None => (
                urls::runtime(&self.env.blobstore, input.runtime_version()),
                true,
            ),
        };
        self.provision(&runtime_url, &self.build_dir.join("runtimes"), use_cache)
            .await?;

        let java_exe = Path::new(defaults::JDK_DIR)
            .join(defaults::JDK_HOME_SUBDIR)
            .join("bin/java");
        stage::stage_static_resources(
            &self.build_dir,
            &self.buildpack_dir,
            &java_exe,
            self.env.license_key.is_some(),
        )?;

        Ok(())
    }

    /// Materialize an archive and unpack it into `dest`
    async fn provision(&self, url: &str, dest: &Path, use_cache: bool) -> Result<(), MxstageError> {
        let archive = self.cache.materialize(url, use_cache).await?;
        unpack::unpack(&archive, dest).await?;
        Ok(())
    }
}

//! Fixed paths and constants for the staging pipeline
//!
//! The build container layout is fixed by the platform contract: toolchains
//! are unpacked into well-known /tmp locations and the staged tree uses a
//! fixed skeleton under the build directory.

/// Subdirectory of the persistent cache volume holding downloaded archives
pub const CACHE_SUBDIR: &str = "artifacts";

/// Ephemeral download directory used when caching is disabled
pub const EPHEMERAL_DOWNLOAD_DIR: &str = "/tmp/downloads";

/// Where the Java SDK archive is unpacked
pub const JDK_DIR: &str = "/tmp/javasdk";

/// Where the mono runtime archive is unpacked
pub const MONO_DIR: &str = "/tmp/mono";

/// Where the mxbuild archive is unpacked
pub const MXBUILD_DIR: &str = "/tmp/mxbuild";

/// Deployment package written by mxbuild (a zip container)
pub const MODEL_PACKAGE: &str = "/tmp/model.mda";

/// File extension denoting a project-definition file
pub const PROJECT_EXTENSION: &str = "mpr";

/// Deployment metadata file, relative to the build directory
pub const METADATA_FILE: &str = "model/metadata.json";

/// Version field inside the deployment metadata
pub const METADATA_VERSION_FIELD: &str = "RuntimeVersion";

/// Metadata table inside the project database
pub const PROJECT_METADATA_TABLE: &str = "_MetaData";

/// Version column of the project metadata table
pub const PROJECT_VERSION_COLUMN: &str = "_ProductVersion";

/// Hidden local-tools directory in the build root
pub const LOCAL_DIR: &str = ".local";

/// Directory skeleton created under the build root during staging
pub const SKELETON_DIRS: &[&str] = &["runtimes", "log", "database", "data/files", "data/tmp"];

/// JVM installation path inside the unpacked JDK package
pub const JDK_HOME_SUBDIR: &str = "usr/lib/jvm/jdk-8-oracle-x64";

/// mxbuild entry point inside the unpacked mxbuild archive
pub const MXBUILD_EXE: &str = "modeler/mxbuild.exe";

/// mono binary inside the unpacked mono archive
pub const MONO_EXE: &str = "bin/mono";

/// Runtime process configuration file shipped with the buildpack
pub const M2EE_CONFIG: &str = "m2ee.yaml";

/// Launcher script shipped with the buildpack
pub const LAUNCHER_SCRIPT: &str = "start.sh";

/// Shared library directory shipped with the buildpack
pub const LIB_DIR: &str = "lib";

/// Telemetry agent directory shipped with the buildpack
pub const TELEMETRY_DIR: &str = "newrelic";

//! Configuration and constants
//!
//! All environment consumption happens here, once, at process entry. The
//! resulting [`Environment`] value is passed by reference into every component
//! that needs it; nothing else in the crate reads environment variables.

pub mod defaults;
pub mod urls;

use std::env;

/// Environment variable names consumed by the pipeline
pub const ENV_FORCED_RUNTIME_URL: &str = "FORCED_MXRUNTIME_URL";
pub const ENV_FORCED_MXBUILD_URL: &str = "FORCED_MXBUILD_URL";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
pub const ENV_LICENSE_KEY: &str = "NEW_RELIC_LICENSE_KEY";
pub const ENV_BLOBSTORE: &str = "BLOBSTORE_URL";

/// External configuration snapshot taken at process entry
///
/// Override URLs pin a specific archive instead of the version-derived one.
/// Overrides are typically unstable dev builds, so caching is disabled for
/// those fetches to keep them out of the shared cache volume.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Override URL for the application runtime archive
    pub runtime_url_override: Option<String>,
    /// Override URL for the mxbuild archive; also enables loose version checking
    pub mxbuild_url_override: Option<String>,
    /// Database connection descriptor; only presence matters at preflight
    pub database_url: Option<String>,
    /// Administrative credential; only presence matters at preflight
    pub admin_password: Option<String>,
    /// Telemetry license key; gates staging of the telemetry agent
    pub license_key: Option<String>,
    /// Base URL for version-derived archive URLs
    pub blobstore: String,
}

impl Environment {
    /// Snapshot the process environment
    pub fn from_env() -> Self {
        Self {
            runtime_url_override: non_empty(ENV_FORCED_RUNTIME_URL),
            mxbuild_url_override: non_empty(ENV_FORCED_MXBUILD_URL),
            database_url: non_empty(ENV_DATABASE_URL),
            admin_password: non_empty(ENV_ADMIN_PASSWORD),
            license_key: non_empty(ENV_LICENSE_KEY),
            blobstore: non_empty(ENV_BLOBSTORE)
                .unwrap_or_else(|| urls::DEFAULT_BLOBSTORE.to_string()),
        }
    }
}

/// Read a variable, treating empty values as unset
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

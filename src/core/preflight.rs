//! Preflight configuration checks
//!
//! Runs before any expensive work. Missing requirements are accumulated so a
//! single failed run reports everything, then the whole run aborts.

use tracing::warn;

use crate::config::{Environment, ENV_ADMIN_PASSWORD, ENV_DATABASE_URL};
use crate::error::PreflightError;

/// Verify all required external configuration is present
pub fn check(env: &Environment) -> Result<(), PreflightError> {
    let mut missing = Vec::new();

    if env.database_url.is_none() {
        missing.push(format!(
            "{ENV_DATABASE_URL} is not set and no database service is bound; \
             bind a database or set {ENV_DATABASE_URL}"
        ));
    }

    if env.admin_password.is_none() {
        missing.push(format!(
            "{ENV_ADMIN_PASSWORD} is not set; set it to the administrative password"
        ));
    }

    if missing.is_empty() {
        return Ok(());
    }

    for item in &missing {
        warn!("{item}");
    }

    Err(PreflightError::MissingConfiguration { missing })
}

//! Environment-variable overrides.
//!
//! `SHELLIDE_*` variables override whatever the config file resolved to.

use crate::error::ConfigError;

use super::Config;

pub(super) const ENV_BASE_URL: &str = "SHELLIDE_BASE_URL";
pub(super) const ENV_AUTH_TOKEN: &str = "SHELLIDE_AUTH_TOKEN";
pub(super) const ENV_PROJECT_ID: &str = "SHELLIDE_PROJECT_ID";
pub(super) const ENV_TIMEOUT_SECS: &str = "SHELLIDE_TIMEOUT_SECS";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty_env(env_lookup, ENV_BASE_URL) {
        config.backend.base_url = url;
    }
    if let Some(token) = non_empty_env(env_lookup, ENV_AUTH_TOKEN) {
        config.backend.auth_token = token;
    }
    if let Some(id) = non_empty_env(env_lookup, ENV_PROJECT_ID) {
        config.project.id = Some(id);
    }
    if let Some(timeout) = non_empty_env(env_lookup, ENV_TIMEOUT_SECS) {
        // Clamp to at least 1 second so a zero never disables the timeout.
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.backend.timeout_secs = parsed.max(1);
    }
    Ok(())
}

/// Trimmed env value, treating blank as unset.
pub(super) fn non_empty_env<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

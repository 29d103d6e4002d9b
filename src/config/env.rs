//! Environment overrides applied after file parsing.

use crate::error::ConfigError;

use super::Config;

pub(super) const ENV_ENDPOINT: &str = "BACKDROP_ENDPOINT";
pub(super) const ENV_OFFLINE: &str = "BACKDROP_OFFLINE";
pub(super) const ENV_STATE_PATH: &str = "BACKDROP_STATE_PATH";
pub(super) const ENV_FETCH_TIMEOUT_SECS: &str = "BACKDROP_FETCH_TIMEOUT_SECS";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = env_lookup(ENV_ENDPOINT) {
        config.retrieval.endpoint = endpoint;
    }
    if let Some(raw) = env_lookup(ENV_OFFLINE) {
        if parse_flag(&raw).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "invalid {ENV_OFFLINE} value `{raw}`: expected 1/0, true/false, or yes/no"
            ))
        })? {
            config.retrieval.enabled = false;
        }
    }
    if let Some(path) = env_lookup(ENV_STATE_PATH) {
        config.store.path = Some(path);
    }
    if let Some(timeout) = env_lookup(ENV_FETCH_TIMEOUT_SECS) {
        let parsed = timeout.trim().parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_FETCH_TIMEOUT_SECS} value `{timeout}`: \
                 expected positive integer seconds"
            ))
        })?;
        // Clamp to at least 1 second; zero would read as "no timeout".
        config.retrieval.timeout_secs = Some(parsed.max(1));
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

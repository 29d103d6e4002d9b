//! Post-parse normalization and validation.

use crate::error::ConfigError;

use super::defaults::{
    DEFAULT_ENDPOINT, DEFAULT_LOG_FILTER, DEFAULT_SPLASH_THEME, DEFAULT_USER_AGENT,
};
use super::Config;

/// Normalize blank values back to defaults and reject unusable settings.
pub(super) fn finalize_config(config: &mut Config) -> Result<(), ConfigError> {
    let retrieval = &mut config.retrieval;
    retrieval.endpoint =
        normalized_string(&retrieval.endpoint).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    retrieval.user_agent = normalized_string(&retrieval.user_agent)
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    if !(retrieval.endpoint.starts_with("http://") || retrieval.endpoint.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "retrieval.endpoint `{}` must be an http(s) URL",
            retrieval.endpoint
        )));
    }
    if retrieval.max_results == 0 {
        return Err(ConfigError::Invalid(
            "retrieval.max_results must be at least 1".to_string(),
        ));
    }
    if retrieval.timeout_secs == Some(0) {
        return Err(ConfigError::Invalid(
            "retrieval.timeout_secs must be positive; omit it to disable the timeout".to_string(),
        ));
    }

    config.splash.default_theme = normalized_string(&config.splash.default_theme)
        .unwrap_or_else(|| DEFAULT_SPLASH_THEME.to_string());
    config.logging.filter = normalized_string(&config.logging.filter)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    Ok(())
}

pub(super) fn normalized_option(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(normalized_string)
}

pub(super) fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

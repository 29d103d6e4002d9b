//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "BACKDROP_LOG";

/// Filter directive to use: `BACKDROP_LOG` when set and non-blank, else the
/// configured one.
pub fn effective_filter(configured: &str, env_value: Option<String>) -> String {
    env_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured.trim().to_string())
}

/// Install a stderr `fmt` subscriber. Invalid directives fall back to `warn`;
/// a second call is a no-op.
pub fn init_tracing(configured_filter: &str) {
    let directive = effective_filter(configured_filter, std::env::var(LOG_ENV_VAR).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Loading and precedence live
//! in `config::mod`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_ENDPOINT, DEFAULT_LOG_FILTER, DEFAULT_MAX_RESULTS, DEFAULT_SPLASH_THEME,
    DEFAULT_USER_AGENT,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub retrieval: RetrievalConfig,
    pub store: StoreConfig,
    pub splash: SplashConfig,
    pub hook: HookConfig,
    pub logging: LoggingConfig,
}

/// Live image-search settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// When false, every resolution uses generated placeholders.
    pub enabled: bool,
    pub endpoint: String,
    pub user_agent: String,
    pub max_results: usize,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
    /// Ask the endpoint for large images only.
    pub large_images_only: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: None,
            large_images_only: false,
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Explicit state file path; defaults under the config root.
    pub path: Option<String>,
}

impl StoreConfig {
    /// Effective state file path, if one can be determined.
    pub fn state_path(&self) -> Option<PathBuf> {
        super::resolve::normalized_option(&self.path)
            .map(PathBuf::from)
            .or_else(super::init::default_state_path)
    }
}

/// Splash startup settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    pub default_theme: String,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_SPLASH_THEME.to_string(),
        }
    }
}

/// Query templates for the template hook. `{term}` is substituted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    pub color_query: Option<String>,
    pub splash_query: Option<String>,
    /// Per-theme splash queries keyed by theme name.
    pub theme_queries: BTreeMap<String, String>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive (e.g. `backdrop=debug`).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// `./backdrop.toml`.
    Local,
    /// `<config root>/backdrop/backdrop.toml`.
    Global(PathBuf),
    /// No file found; built-in defaults.
    BuiltInDefaults,
}

/// Configuration payload plus where it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Result of explicit config initialization (`backdrop init`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}

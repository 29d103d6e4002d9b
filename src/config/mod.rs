//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`BACKDROP_ENDPOINT`, `BACKDROP_OFFLINE`,
//!    `BACKDROP_STATE_PATH`, `BACKDROP_FETCH_TIMEOUT_SECS`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./backdrop.toml in the current directory
//! 4. $XDG_CONFIG_HOME/backdrop/backdrop.toml (or ~/.config/backdrop/backdrop.toml)
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

mod defaults;
mod env;
mod init;
mod resolve;
mod sources;
mod types;

pub use init::{
    config_root_dir, default_global_config_path, default_state_path,
    initialize_config_at_path, initialize_default_global_config,
};
pub use types::{
    Config, ConfigSource, GlobalConfigInitResult, HookConfig, LoadedConfig, LoggingConfig,
    RetrievalConfig, SplashConfig, StoreConfig,
};

use env::apply_runtime_env_overrides;
use resolve::finalize_config;
use sources::read_config_text_with_sources;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    Ok(load_config_with_source(path_override)?.config)
}

/// Load configuration and report which source supplied it.
pub fn load_config_with_source(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    finalize_config(&mut config)?;
    Ok(LoadedConfig { config, source })
}

//! Default configuration constants.
//!
//! Keeping defaults in one module lets the template, the serde defaults, and
//! the tests share the same literals.

/// Embedded default `backdrop.toml` template written by `backdrop init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/backdrop.toml");
/// Config file name looked up locally and under the config root.
pub(super) const CONFIG_FILE_NAME: &str = "backdrop.toml";
/// Directory under the config root holding config and state.
pub(super) const APP_DIR_NAME: &str = "backdrop";
/// State file name under the app directory.
pub(super) const STATE_FILE_NAME: &str = "state.json";
/// Default image-search endpoint.
pub(super) const DEFAULT_ENDPOINT: &str = "https://www.google.com/search";
/// Browser-like identity sent with search requests.
pub(super) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
/// Upper bound on candidates per resolution.
pub(super) const DEFAULT_MAX_RESULTS: usize = 10;
/// Splash theme used when nothing has been chosen yet.
pub(super) const DEFAULT_SPLASH_THEME: &str = "космос";
/// Default tracing filter directive.
pub(super) const DEFAULT_LOG_FILTER: &str = "warn";

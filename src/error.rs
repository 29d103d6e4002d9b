//! Unified error types for resolution, persistence, and configuration.

use std::fmt;

// ---------------------------------------------------------------------------
// RetrievalError
// ---------------------------------------------------------------------------

/// Why a live image search produced no candidates.
///
/// These never reach callers of the resolution engine; they are logged and
/// the engine degrades to fallback generation.
#[derive(Debug)]
pub enum RetrievalError {
    /// Network / reqwest-level error (DNS, connect, timeout).
    Http(reqwest::Error),
    /// Non-2xx status from the search endpoint.
    Status(u16),
    /// Response body could not be read as text.
    Body(String),
    /// The page parsed, but no absolute image references were found.
    NoImages,
}

impl RetrievalError {
    /// True for transport/status failures, false for parse-level outcomes.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status(_))
    }
}

impl fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::Body(msg) => write!(f, "unreadable body: {msg}"),
            Self::NoImages => write!(f, "no image references in response"),
        }
    }
}

impl std::error::Error for RetrievalError {}

impl From<reqwest::Error> for RetrievalError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors from the persistence layer.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
    /// The state file exists but is not a document this build understands.
    Corrupt(String),
    RowNotFound {
        table: &'static str,
        id: u64,
    },
    /// A row or slot value was rejected before writing.
    Invalid(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Serialize(e) => write!(f, "serialize: {e}"),
            Self::Corrupt(msg) => write!(f, "corrupt state: {msg}"),
            Self::RowNotFound { table, id } => write!(f, "no row {id} in {table}"),
            Self::Invalid(msg) => write!(f, "invalid value: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// User input rejected before any network or storage call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooShort { min: usize, len: usize },
    /// Rejected by an injected script hook.
    Rejected(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name cannot be empty"),
            Self::TooShort { min, len } => {
                write!(f, "name is too short ({len} characters, need at least {min})")
            }
            Self::Rejected(input) => write!(f, "name `{input}` was rejected"),
        }
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_error_display() {
        assert_eq!(RetrievalError::Status(503).to_string(), "status 503");
        assert_eq!(
            RetrievalError::NoImages.to_string(),
            "no image references in response"
        );
    }

    #[test]
    fn retrieval_error_network_classification() {
        assert!(RetrievalError::Status(429).is_network());
        assert!(!RetrievalError::NoImages.is_network());
        assert!(!RetrievalError::Body("bad utf-8".into()).is_network());
    }

    #[test]
    fn store_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let s = StoreError::from(io_err).to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("denied"));
    }

    #[test]
    fn store_error_row_not_found_names_table() {
        let e = StoreError::RowNotFound {
            table: "backgrounds",
            id: 7,
        };
        assert_eq!(e.to_string(), "no row 7 in backgrounds");
    }

    #[test]
    fn validation_error_messages() {
        assert_eq!(ValidationError::Empty.to_string(), "name cannot be empty");
        assert_eq!(
            ValidationError::TooShort { min: 2, len: 1 }.to_string(),
            "name is too short (1 characters, need at least 2)"
        );
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        assert!(ConfigError::from(toml_err).to_string().starts_with("toml:"));
    }
}

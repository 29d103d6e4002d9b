//! Table rows.
//!
//! Each table's rows are a distinct struct; [`Row`] tags them once at the
//! table boundary so callers never inspect a row to learn what it is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;
use crate::textutil::char_len;

/// Longest accepted color option name, in characters.
pub const MAX_COLOR_NAME_CHARS: usize = 50;
/// Longest accepted splash option name, in characters.
pub const MAX_SPLASH_NAME_CHARS: usize = 100;

/// The tables the store keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Colors,
    Splashes,
    Backgrounds,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Splashes => "splashes",
            Self::Backgrounds => "backgrounds",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "colors" | "color" | "coloroptions" => Ok(Self::Colors),
            "splashes" | "splash" | "splashoptions" => Ok(Self::Splashes),
            "backgrounds" | "background" | "savedbackgrounds" => Ok(Self::Backgrounds),
            other => Err(format!(
                "unknown table `{other}` (expected colors, splashes, or backgrounds)"
            )),
        }
    }
}

/// A selectable background color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub id: u64,
    pub color_name: String,
    pub is_active: bool,
}

/// A selectable splash theme, optionally with a fixed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplashOption {
    pub id: u64,
    pub splash_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// An image background the user applied at some point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBackground {
    pub id: u64,
    pub image_url: String,
    pub color_name: String,
    /// At most one row in the table has this set.
    pub is_current: bool,
    pub saved_at_millis: u64,
}

/// A row from any table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Color(ColorOption),
    Splash(SplashOption),
    Background(SavedBackground),
}

impl Row {
    pub fn id(&self) -> u64 {
        match self {
            Self::Color(row) => row.id,
            Self::Splash(row) => row.id,
            Self::Background(row) => row.id,
        }
    }

    pub fn table(&self) -> Table {
        match self {
            Self::Color(_) => Table::Colors,
            Self::Splash(_) => Table::Splashes,
            Self::Background(_) => Table::Backgrounds,
        }
    }

    /// The row's active flag (`is_current` for saved backgrounds).
    pub fn is_active(&self) -> bool {
        match self {
            Self::Color(row) => row.is_active,
            Self::Splash(row) => row.is_active,
            Self::Background(row) => row.is_current,
        }
    }

    pub(super) fn validate(&self) -> Result<(), StoreError> {
        match self {
            Self::Color(row) => validate_label("color_name", &row.color_name, MAX_COLOR_NAME_CHARS),
            Self::Splash(row) => {
                validate_label("splash_name", &row.splash_name, MAX_SPLASH_NAME_CHARS)
            }
            Self::Background(row) => {
                if row.image_url.trim().is_empty() {
                    return Err(StoreError::Invalid("image_url cannot be empty".to_string()));
                }
                Ok(())
            }
        }
    }
}

/// A row to insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewRow {
    Color {
        color_name: String,
        is_active: bool,
    },
    Splash {
        splash_name: String,
        image_url: Option<String>,
        is_active: bool,
    },
    Background {
        image_url: String,
        color_name: String,
        is_current: bool,
    },
}

impl NewRow {
    pub(super) fn into_row(self, id: u64, now_millis: u64) -> Row {
        match self {
            Self::Color {
                color_name,
                is_active,
            } => Row::Color(ColorOption {
                id,
                color_name: color_name.trim().to_string(),
                is_active,
            }),
            Self::Splash {
                splash_name,
                image_url,
                is_active,
            } => Row::Splash(SplashOption {
                id,
                splash_name: splash_name.trim().to_string(),
                image_url: image_url
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty()),
                is_active,
            }),
            Self::Background {
                image_url,
                color_name,
                is_current,
            } => Row::Background(SavedBackground {
                id,
                image_url: image_url.trim().to_string(),
                color_name: color_name.trim().to_string(),
                is_current,
                saved_at_millis: now_millis,
            }),
        }
    }
}

/// Which rows `list_rows` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowFilter {
    #[default]
    All,
    ActiveOnly,
}

fn validate_label(field: &str, value: &str, max_chars: usize) -> Result<(), StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Invalid(format!("{field} cannot be empty")));
    }
    if char_len(trimmed) > max_chars {
        return Err(StoreError::Invalid(format!(
            "{field} exceeds {max_chars} characters"
        )));
    }
    Ok(())
}

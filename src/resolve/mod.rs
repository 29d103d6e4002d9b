//! Name-to-candidates resolution.
//!
//! A resolution turns a color or theme name into an ordered, non-empty list
//! of image candidates: one live search attempt through an [`ImageSource`],
//! then deterministic [`fallback`] generation when the search yields nothing.

pub mod engine;
pub mod fallback;
pub mod hook;
pub mod retriever;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use engine::ResolutionEngine;
pub use hook::{validate_name, DefaultHook, ScriptHook, TemplateHook};
pub use retriever::{ImageSource, OfflineSource, WebImageRetriever};

/// What a resolution is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Main background keyed by a color name.
    Color,
    /// Splash screen keyed by a theme name.
    Splash,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => write!(f, "color"),
            Self::Splash => write!(f, "splash"),
        }
    }
}

/// One proposed image, produced fresh per resolution and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub url: String,
    pub title: String,
    pub origin: Intent,
}

impl ImageCandidate {
    /// Wrap `urls` in order, titling each by name and 1-based position.
    pub(crate) fn wrap_all(name: &str, origin: Intent, urls: Vec<String>) -> Vec<Self> {
        let kind = match origin {
            Intent::Color => "background",
            Intent::Splash => "splash",
        };
        let label = name.trim();
        urls.into_iter()
            .enumerate()
            .map(|(idx, url)| Self {
                url,
                title: format!("{label} {kind} {}", idx + 1),
                origin,
            })
            .collect()
    }
}

//! Optional per-call customization of query building, validation, and
//! result analysis.
//!
//! A hook is injected per resolution rather than shared process-wide, so one
//! caller's customization cannot leak into another's. The trait's default
//! methods are the built-in behavior: passing [`DefaultHook`] is
//! observationally identical to passing no hook at all.

use std::collections::BTreeMap;

use super::retriever::build_query;
use super::Intent;
use crate::config::HookConfig;
use crate::error::ValidationError;
use crate::textutil::char_len;

/// Shortest accepted color or theme name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

/// Built-in name validation: non-blank and at least [`MIN_NAME_CHARS`] long.
pub fn validate_name(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = char_len(trimmed);
    if len < MIN_NAME_CHARS {
        return Err(ValidationError::TooShort {
            min: MIN_NAME_CHARS,
            len,
        });
    }
    Ok(trimmed)
}

/// Strategy object consulted during resolution and selection.
pub trait ScriptHook: Send + Sync {
    /// Search query for `term`.
    fn build_query(&self, term: &str, intent: Intent) -> String {
        build_query(term, intent)
    }

    /// Whether `text` is acceptable as a color or theme name.
    fn validate(&self, text: &str) -> bool {
        validate_name(text).is_ok()
    }

    /// One-line summary of a finished resolution, for logs.
    fn analyze(&self, count: usize, term: &str) -> String {
        format!("found {count} images for `{}`", term.trim())
    }
}

/// Hook with only the built-in behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHook;

impl ScriptHook for DefaultHook {}

/// Hook that builds queries from configured `{term}` templates.
///
/// Intents without a template, and themes without a per-theme template, use
/// the built-in query.
#[derive(Debug, Clone, Default)]
pub struct TemplateHook {
    color_query: Option<String>,
    splash_query: Option<String>,
    theme_queries: BTreeMap<String, String>,
}

impl TemplateHook {
    pub fn from_config(config: &HookConfig) -> Self {
        Self {
            color_query: non_blank(config.color_query.as_deref()),
            splash_query: non_blank(config.splash_query.as_deref()),
            theme_queries: config
                .theme_queries
                .iter()
                .map(|(theme, query)| (theme.trim().to_lowercase(), query.clone()))
                .collect(),
        }
    }

    /// True when no template is configured, i.e. the hook changes nothing.
    pub fn is_empty(&self) -> bool {
        self.color_query.is_none() && self.splash_query.is_none() && self.theme_queries.is_empty()
    }
}

impl ScriptHook for TemplateHook {
    fn build_query(&self, term: &str, intent: Intent) -> String {
        let term = term.trim();
        let template = match intent {
            Intent::Color => self.color_query.as_deref(),
            Intent::Splash => self
                .theme_queries
                .get(&term.to_lowercase())
                .map(String::as_str)
                .or(self.splash_query.as_deref()),
        };
        match template {
            Some(template) => template.replace("{term}", term),
            None => build_query(term, intent),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_name_rejects_blank_and_short() {
        assert_eq!(validate_name("   "), Err(ValidationError::Empty));
        assert_eq!(
            validate_name(" я "),
            Err(ValidationError::TooShort { min: 2, len: 1 })
        );
    }

    #[test]
    fn validate_name_counts_characters_not_bytes() {
        // Two Cyrillic characters are four bytes but still valid.
        assert_eq!(validate_name("ум"), Ok("ум"));
        assert_eq!(validate_name("  лес "), Ok("лес"));
    }

    #[test]
    fn default_hook_matches_builtin_behavior() {
        let hook = DefaultHook;
        assert_eq!(
            hook.build_query("горы", Intent::Splash),
            build_query("горы", Intent::Splash)
        );
        assert!(hook.validate("синий"));
        assert!(!hook.validate("x"));
        assert_eq!(hook.analyze(3, " лес "), "found 3 images for `лес`");
    }

    #[test]
    fn template_hook_substitutes_term() {
        let hook = TemplateHook::from_config(&HookConfig {
            color_query: Some("{term} gradient wallpaper".into()),
            ..HookConfig::default()
        });
        assert_eq!(
            hook.build_query(" red ", Intent::Color),
            "red gradient wallpaper"
        );
        // No splash template configured: built-in query.
        assert_eq!(
            hook.build_query("aurora", Intent::Splash),
            "aurora landscape wallpaper 4k hd"
        );
    }

    #[test]
    fn template_hook_prefers_per_theme_template() {
        let mut theme_queries = BTreeMap::new();
        theme_queries.insert("Лес".to_string(), "taiga winter panorama".to_string());
        let hook = TemplateHook::from_config(&HookConfig {
            splash_query: Some("{term} scenic photo".into()),
            theme_queries,
            ..HookConfig::default()
        });
        assert_eq!(hook.build_query("ЛЕС", Intent::Splash), "taiga winter panorama");
        assert_eq!(hook.build_query("река", Intent::Splash), "река scenic photo");
    }

    #[test]
    fn blank_templates_count_as_absent() {
        let hook = TemplateHook::from_config(&HookConfig {
            color_query: Some("   ".into()),
            ..HookConfig::default()
        });
        assert!(hook.is_empty());
    }
}

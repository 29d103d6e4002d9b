//! Selection workflow and startup reconstruction.
//!
//! [`BackdropService`] composes validation, resolution, and persistence the
//! way the app uses them: a name is validated before anything else runs,
//! resolution never fails, and persistence failures are logged and
//! swallowed so a full disk never blocks browsing.

use std::sync::Arc;

use crate::config::Config;
use crate::error::ValidationError;
use crate::resolve::{
    validate_name, ImageCandidate, Intent, ResolutionEngine, ScriptHook, TemplateHook,
};
use crate::store::{ColorOption, CurrentBackground, PersistenceStore};
use crate::textutil::normalize_label;

/// Result of browsing a color or splash theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The validated, trimmed name.
    pub name: String,
    pub intent: Intent,
    /// Never empty.
    pub candidates: Vec<ImageCandidate>,
    /// Whether the name was written to the store.
    pub persisted: bool,
}

/// Where the startup splash image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashSource {
    /// An explicitly saved splash image.
    SavedImage,
    /// The image of the catalog splash option matching the saved theme.
    CatalogImage(String),
    /// Resolved from the saved splash theme name.
    SavedTheme(String),
    /// Resolved from the configured default theme.
    DefaultTheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashStartup {
    pub url: String,
    pub source: SplashSource,
}

pub struct BackdropService {
    engine: ResolutionEngine,
    store: PersistenceStore,
    hook: Option<Arc<dyn ScriptHook>>,
    default_theme: String,
    max_results: usize,
}

impl BackdropService {
    pub fn new(
        engine: ResolutionEngine,
        store: PersistenceStore,
        default_theme: impl Into<String>,
        max_results: usize,
    ) -> Self {
        Self {
            engine,
            store,
            hook: None,
            default_theme: default_theme.into(),
            max_results: max_results.max(1),
        }
    }

    /// Service wired from config: engine from `[retrieval]`, default theme
    /// from `[splash]`, and a template hook when `[hook]` sets anything.
    pub fn from_config(config: &Config, store: PersistenceStore) -> Self {
        let service = Self::new(
            ResolutionEngine::from_config(&config.retrieval),
            store,
            config.splash.default_theme.clone(),
            config.retrieval.max_results,
        );
        let hook = TemplateHook::from_config(&config.hook);
        if hook.is_empty() {
            service
        } else {
            service.with_hook(Arc::new(hook))
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn ScriptHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn store(&self) -> &PersistenceStore {
        &self.store
    }

    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    /// Built-in validation, then the hook's, if any. Returns the trimmed name.
    pub fn validate<'a>(&self, text: &'a str) -> Result<&'a str, ValidationError> {
        let name = validate_name(text)?;
        if let Some(hook) = &self.hook {
            if !hook.validate(name) {
                return Err(ValidationError::Rejected(name.to_string()));
            }
        }
        Ok(name)
    }

    /// Validate a color name, resolve background candidates, and remember the
    /// color.
    pub async fn browse_color(
        &self,
        name: &str,
        max_results: Option<usize>,
    ) -> Result<Selection, ValidationError> {
        let name = self.validate(name)?;
        let candidates = self.resolve(name, Intent::Color, max_results).await;
        let persisted = match self.store.set_current_color_name(name) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(color = name, error = %err, "failed to save current color");
                false
            }
        };
        Ok(Selection {
            name: name.to_string(),
            intent: Intent::Color,
            candidates,
            persisted,
        })
    }

    /// Validate a theme name, remember it, and resolve splash candidates.
    pub async fn browse_splash(
        &self,
        name: &str,
        max_results: Option<usize>,
    ) -> Result<Selection, ValidationError> {
        let name = self.validate(name)?;
        let persisted = match self.store.set_current_splash_name(name) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(splash = name, error = %err, "failed to save current splash");
                false
            }
        };
        let candidates = self.resolve(name, Intent::Splash, max_results).await;
        Ok(Selection {
            name: name.to_string(),
            intent: Intent::Splash,
            candidates,
            persisted,
        })
    }

    /// Persist the user's pick: a background image (labelled `color_label`)
    /// or a splash image, by the candidate's origin. Returns whether it was
    /// saved.
    pub fn apply_candidate(&self, candidate: &ImageCandidate, color_label: &str) -> bool {
        let saved = match candidate.origin {
            Intent::Color => self
                .store
                .set_current_background_image(&candidate.url, color_label)
                .map(|_| ()),
            Intent::Splash => self.store.set_current_splash_image(&candidate.url),
        };
        match saved {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    intent = %candidate.origin,
                    url = %candidate.url,
                    error = %err,
                    "failed to save selected image"
                );
                false
            }
        }
    }

    /// What the main display should show at startup.
    pub fn startup_display(&self) -> CurrentBackground {
        self.store.get_current_display()
    }

    /// Catalog color option to preselect: the one named by the saved color,
    /// else the first active one.
    pub fn startup_color_option(&self) -> Option<ColorOption> {
        self.store.current_color_option()
    }

    /// Splash image for startup, first hit wins:
    ///
    /// 1. the explicitly saved splash image;
    /// 2. the catalog option named by the saved theme, if it carries an image;
    /// 3. the first candidate resolved for the saved theme;
    /// 4. the first candidate resolved for the default theme.
    pub async fn startup_splash(&self) -> SplashStartup {
        if let Some(url) = self.store.get_current_splash_image() {
            return SplashStartup {
                url,
                source: SplashSource::SavedImage,
            };
        }
        if let Some(theme) = self.store.get_current_splash_name() {
            let catalog_url = self
                .store
                .current_splash_option()
                .filter(|option| normalize_label(&option.splash_name) == normalize_label(&theme))
                .and_then(|option| option.image_url)
                .filter(|url| !url.trim().is_empty());
            if let Some(url) = catalog_url {
                return SplashStartup {
                    url,
                    source: SplashSource::CatalogImage(theme),
                };
            }
            let resolved = self.resolve(&theme, Intent::Splash, Some(1)).await;
            if let Some(first) = resolved.into_iter().next() {
                return SplashStartup {
                    url: first.url,
                    source: SplashSource::SavedTheme(theme),
                };
            }
        }
        let theme = self.default_theme.clone();
        let url = self
            .resolve(&theme, Intent::Splash, Some(1))
            .await
            .into_iter()
            .next()
            .map(|candidate| candidate.url)
            .unwrap_or_default();
        SplashStartup {
            url,
            source: SplashSource::DefaultTheme(theme),
        }
    }

    async fn resolve(
        &self,
        name: &str,
        intent: Intent,
        max_results: Option<usize>,
    ) -> Vec<ImageCandidate> {
        let max_results = max_results.unwrap_or(self.max_results);
        let candidates = self
            .engine
            .resolve_with(name, intent, max_results, self.hook.as_deref())
            .await;
        tracing::debug!(%intent, name, count = candidates.len(), "resolved candidates");
        candidates
    }
}

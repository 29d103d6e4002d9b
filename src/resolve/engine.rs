//! Resolution orchestration: one live search, then deterministic fallback.

use std::sync::Arc;

use super::fallback;
use super::hook::{DefaultHook, ScriptHook};
use super::retriever::{build_wallpaper_query, ImageSource, OfflineSource, WebImageRetriever};
use super::{ImageCandidate, Intent};
use crate::color;
use crate::config::RetrievalConfig;
use crate::textutil::normalize_label;

/// Turns names into non-empty candidate lists.
///
/// Cloning is cheap; clones share the underlying image source.
#[derive(Clone)]
pub struct ResolutionEngine {
    source: Arc<dyn ImageSource>,
    wallpaper_splash: bool,
}

impl ResolutionEngine {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self {
            source,
            wallpaper_splash: false,
        }
    }

    /// Engine over the configured web retriever, or offline when disabled.
    pub fn from_config(config: &RetrievalConfig) -> Self {
        if config.enabled {
            Self::new(Arc::new(WebImageRetriever::new(config)))
                .with_wallpaper_splash(config.large_images_only)
        } else {
            Self::offline()
        }
    }

    /// Search splash themes with the desktop-wallpaper query instead of the
    /// built-in one. A hook that builds its own query still wins.
    pub fn with_wallpaper_splash(mut self, enabled: bool) -> Self {
        self.wallpaper_splash = enabled;
        self
    }

    /// Engine that never touches the network.
    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineSource))
    }

    /// Name of the image source, for diagnostics.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Resolve `name` with built-in query building.
    pub async fn resolve(
        &self,
        name: &str,
        intent: Intent,
        max_results: usize,
    ) -> Vec<ImageCandidate> {
        self.resolve_with(name, intent, max_results, None).await
    }

    /// Resolve `name`, consulting `hook` for the query and the summary line.
    ///
    /// Never returns an empty list and never more than `max_results` items
    /// (a zero limit is treated as one). Exactly one search attempt is made.
    pub async fn resolve_with(
        &self,
        name: &str,
        intent: Intent,
        max_results: usize,
        hook: Option<&dyn ScriptHook>,
    ) -> Vec<ImageCandidate> {
        let max_results = max_results.max(1);
        let query = match hook {
            Some(hook) => hook.build_query(name, intent),
            None if self.wallpaper_splash && intent == Intent::Splash => {
                build_wallpaper_query(name)
            }
            None => DefaultHook.build_query(name, intent),
        };
        let hook = hook.unwrap_or(&DefaultHook);

        let mut urls = match self.source.search(&query, max_results).await {
            Ok(urls) => urls,
            Err(err) if err.is_network() => {
                tracing::warn!(
                    source = self.source.name(),
                    %query,
                    error = %err,
                    "image search failed"
                );
                Vec::new()
            }
            Err(err) => {
                tracing::debug!(
                    source = self.source.name(),
                    %query,
                    error = %err,
                    "image search found nothing"
                );
                Vec::new()
            }
        };
        urls.truncate(max_results);

        if urls.is_empty() {
            urls = fallback_urls(name, intent);
            urls.truncate(max_results);
            tracing::info!(
                %name,
                %intent,
                count = urls.len(),
                "using generated fallback candidates"
            );
        }

        tracing::debug!("{}", hook.analyze(urls.len(), name));
        ImageCandidate::wrap_all(name, intent, urls)
    }
}

impl std::fmt::Debug for ResolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionEngine")
            .field("source", &self.source.name())
            .field("wallpaper_splash", &self.wallpaper_splash)
            .finish()
    }
}

/// Fallback key: resolved color hex for colors, normalized theme for splashes.
fn fallback_urls(name: &str, intent: Intent) -> Vec<String> {
    match intent {
        Intent::Color => fallback::color_samples(color::resolve(name)),
        Intent::Splash => fallback::theme_samples(&normalize_label(name)),
    }
}

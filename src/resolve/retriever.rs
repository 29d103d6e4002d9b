//! Live image search.
//!
//! Issues exactly one GET against an HTML image-search endpoint and scrapes
//! absolute image URLs out of the response. Every failure mode (transport,
//! status, empty page) is a normal "no candidates" outcome for callers.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;

use super::Intent;
use crate::config::RetrievalConfig;
use crate::error::RetrievalError;
use crate::textutil::{form_urlencode, normalize_label};

/// A source of candidate image URLs for a search query.
///
/// Implementations hold no per-call mutable state, so one instance can serve
/// concurrent resolutions.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run one search and return up to `max_results` absolute image URLs.
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<String>, RetrievalError>;
}

/// Splash themes with hand-tuned search phrasing.
const THEME_QUERIES: &[(&[&str], &str)] = &[
    (&["пустыня", "desert"], "desert landscape wallpaper 4k hd"),
    (&["джунгли", "jungle"], "jungle tropical forest wallpaper 4k hd"),
    (&["город", "city"], "city skyline urban wallpaper 4k hd night"),
    (&["океан", "ocean"], "ocean sea waves wallpaper 4k hd blue"),
    (&["горы", "mountains"], "mountains peaks landscape wallpaper 4k hd"),
    (&["космос", "space"], "space galaxy stars nebula wallpaper 4k hd"),
];

/// Build the default search query for `term`.
pub fn build_query(term: &str, intent: Intent) -> String {
    let term = term.trim();
    match intent {
        Intent::Color => format!("{term} background wallpaper 4k"),
        Intent::Splash => {
            let key = normalize_label(term);
            THEME_QUERIES
                .iter()
                .find(|(labels, _)| labels.contains(&key.as_str()))
                .map(|(_, query)| query.to_string())
                .unwrap_or_else(|| format!("{term} landscape wallpaper 4k hd"))
        }
    }
}

/// Query for large desktop wallpapers of a splash theme, used when only
/// large images are wanted.
pub fn build_wallpaper_query(theme: &str) -> String {
    format!("{} wallpaper 4k ultra hd desktop background", theme.trim())
}

/// Image search over an HTML endpoint with a reusable HTTP client.
#[derive(Debug, Clone)]
pub struct WebImageRetriever {
    http: reqwest::Client,
    endpoint: String,
    large_images_only: bool,
}

impl WebImageRetriever {
    /// Build a retriever with its own client configured from `config`.
    pub fn new(config: &RetrievalConfig) -> Self {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs.max(1)));
        }
        let http = builder.build().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default http client");
            reqwest::Client::new()
        });
        Self::with_client(http, config)
    }

    /// Build a retriever around an existing client. The client is expected
    /// to carry its own identity header.
    pub fn with_client(http: reqwest::Client, config: &RetrievalConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.trim().to_string(),
            large_images_only: config.large_images_only,
        }
    }

    /// Search for `term` and return up to `max_results` URLs; empty on any failure.
    pub async fn fetch(&self, term: &str, intent: Intent, max_results: usize) -> Vec<String> {
        match self.try_fetch(term, intent, max_results).await {
            Ok(urls) => urls,
            Err(err) => {
                tracing::debug!(%term, %intent, error = %err, "image search yielded nothing");
                Vec::new()
            }
        }
    }

    /// Like [`fetch`](Self::fetch), but reports why nothing was found.
    pub async fn try_fetch(
        &self,
        term: &str,
        intent: Intent,
        max_results: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        self.search(&self.query_for(term, intent), max_results).await
    }

    /// Query [`try_fetch`](Self::try_fetch) sends for `term`.
    pub fn query_for(&self, term: &str, intent: Intent) -> String {
        if self.large_images_only && intent == Intent::Splash {
            build_wallpaper_query(term)
        } else {
            build_query(term, intent)
        }
    }

    /// Full request URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{separator}q={}&tbm=isch",
            self.endpoint,
            form_urlencode(query)
        );
        if self.large_images_only {
            url.push_str("&tbs=isz:l");
        }
        url
    }
}

#[async_trait]
impl ImageSource for WebImageRetriever {
    fn name(&self) -> &'static str {
        "web"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        let url = self.search_url(query);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status(status.as_u16()));
        }
        let html = response
            .text()
            .await
            .map_err(|e| RetrievalError::Body(e.to_string()))?;

        let urls = extract_image_urls(&html, max_results);
        if urls.is_empty() {
            return Err(RetrievalError::NoImages);
        }
        Ok(urls)
    }
}

/// Source that never finds anything; resolution always falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

#[async_trait]
impl ImageSource for OfflineSource {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn search(
        &self,
        _query: &str,
        _max_results: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        Ok(Vec::new())
    }
}

/// Collect absolute `img` sources in document order, deduplicated.
pub(crate) fn extract_image_urls(html: &str, max_results: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let img_selector = Selector::parse("img").expect("valid img selector");

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for img in document.select(&img_selector) {
        if urls.len() >= max_results {
            break;
        }
        let element = img.value();
        let Some(src) = ["src", "data-src"]
            .iter()
            .filter_map(|attr| element.attr(attr))
            .map(str::trim)
            .find(|value| is_absolute_http(value))
        else {
            continue;
        };
        if seen.insert(src.to_string()) {
            urls.push(src.to_string());
        }
    }
    urls
}

fn is_absolute_http(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

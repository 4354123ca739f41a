//! HTML and URL helpers shared by the directory strategies.

use scraper::{ElementRef, Selector};
use std::collections::HashSet;
use url::Url;

use crate::domain::normalize_path;
use crate::errors::ExtractionError;

/// Compiles a CSS selector.
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector(format!("{css}: {e:?}")))
}

/// Collects the trimmed text of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses a result URL.
pub(crate) fn parse_result_url(result_url: &str) -> Result<Url, ExtractionError> {
    Url::parse(normalize_path(result_url.trim()))
        .map_err(|e| ExtractionError::malformed(result_url, e.to_string()))
}

/// Final segment of a URL path after trailing-slash removal.
pub(crate) fn last_path_segment(url: &Url) -> &str {
    normalize_path(url.path()).rsplit('/').next().unwrap_or("")
}

/// Ordered, de-duplicated collection of extracted URLs.
#[derive(Debug, Default)]
pub(crate) struct UniqueUrls {
    seen: HashSet<String>,
    urls: Vec<String>,
}

impl UniqueUrls {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a value; blank values and repeats are ignored.
    pub(crate) fn push(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() || self.seen.contains(value) {
            return;
        }
        self.seen.insert(value.to_string());
        self.urls.push(value.to_string());
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

//! Organic result extraction from a search engine results page.

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::core::SearchResult;
use crate::errors::ExtractionError;
use crate::extractors::html::selector;

/// Base used to resolve engine-relative redirect links.
const ENGINE_BASE: &str = "https://www.google.com/";

/// Collects result URLs from the organic-result containers of a SERP.
#[derive(Debug, Clone)]
pub struct SerpCollector {
    container: Selector,
    anchor: Selector,
}

impl SerpCollector {
    /// Creates a collector keyed on a result container CSS class.
    pub fn new(container_class: &str) -> Result<Self, ExtractionError> {
        Ok(Self {
            container: selector(&format!("div.{container_class}"))?,
            anchor: selector("a[href]")?,
        })
    }

    /// Returns result URLs in page order.
    ///
    /// A page with no result containers yields an empty list.
    #[must_use]
    pub fn collect(&self, html: &str) -> Vec<SearchResult> {
        let document = Html::parse_document(html);

        let results: Vec<SearchResult> = document
            .select(&self.container)
            .filter_map(|container| container.select(&self.anchor).next())
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(resolve_result_href)
            .map(SearchResult::new)
            .collect();

        debug!(count = results.len(), "Collected search results");
        results
    }
}

/// Turns a result anchor `href` into an absolute directory URL.
///
/// Absolute http(s) links are kept; `/url?q=<target>` redirects are unwrapped.
fn resolve_result_href(href: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    if href.starts_with("/url?") {
        let base = Url::parse(ENGINE_BASE).ok()?;
        let redirect = base.join(href).ok()?;
        return redirect
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")
            .map(|(_, target)| target.into_owned())
            .filter(|target| target.starts_with("http://") || target.starts_with("https://"));
    }

    debug!(href, "Skipping non-absolute search result link");
    None
}

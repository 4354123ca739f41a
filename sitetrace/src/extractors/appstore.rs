//! iOS app listings.

use scraper::Html;

use super::html::{element_text, last_path_segment, parse_result_url, selector, UniqueUrls};
use super::{ContentExtractor, IdentifierExtractor, SourceStrategy};
use crate::core::SourceType;
use crate::errors::ExtractionError;

const EXTERNAL_LINK: &str = "a.link.icon.icon-after.icon-external";
const APP_ID_PREFIX: &str = "id";

/// Link texts whose targets point at the developer.
pub const RECOGNIZED_LABELS: [&str; 3] = ["Developer Website", "App Support", "Privacy Policy"];

/// Strategy for App Store listings (`/<cc>/app/<name>/id<digits>`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AppStoreStrategy;

impl IdentifierExtractor for AppStoreStrategy {
    fn extract_id(&self, result_url: &str) -> Result<String, ExtractionError> {
        let url = parse_result_url(result_url)?;
        let segment = last_path_segment(&url);
        let id = segment.strip_prefix(APP_ID_PREFIX).unwrap_or(segment);
        if id.is_empty() {
            return Err(ExtractionError::missing(result_url, "app id"));
        }
        Ok(id.to_string())
    }
}

impl ContentExtractor for AppStoreStrategy {
    fn extract_websites(&self, html: &str) -> Result<Vec<String>, ExtractionError> {
        let document = Html::parse_document(html);
        let link = selector(EXTERNAL_LINK)?;

        let mut found = false;
        let mut urls = UniqueUrls::new();
        for element in document.select(&link) {
            found = true;
            let text = element_text(element);
            if !RECOGNIZED_LABELS.iter().any(|label| text.contains(label)) {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                urls.push(href);
            }
        }

        if found {
            Ok(urls.into_vec())
        } else {
            Err(ExtractionError::not_found(EXTERNAL_LINK))
        }
    }
}

impl SourceStrategy for AppStoreStrategy {
    fn source_type(&self) -> SourceType {
        SourceType::AppStoreIos
    }
}

//! Android app listings.

use scraper::Html;

use super::html::{element_text, parse_result_url, selector, UniqueUrls};
use super::{ContentExtractor, IdentifierExtractor, SourceStrategy};
use crate::core::SourceType;
use crate::errors::ExtractionError;

/// One row of the "App support" section.
const SUPPORT_ROW: &str = "div.pZ8Djf";
const ROW_LABEL: &str = "div.xFVDSb";
const ROW_VALUE: &str = "div.pSEeg";
const PACKAGE_PARAM: &str = "id";

/// Support-row labels whose values point at the developer.
pub const RECOGNIZED_LABELS: [&str; 3] = ["Website", "Email", "Privacy policy"];

/// Strategy for Google Play listings (`/store/apps/details?id=<package>`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayStoreStrategy;

impl IdentifierExtractor for PlayStoreStrategy {
    fn extract_id(&self, result_url: &str) -> Result<String, ExtractionError> {
        let url = parse_result_url(result_url)?;
        url.query_pairs()
            .find(|(key, _)| key == PACKAGE_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ExtractionError::missing(result_url, PACKAGE_PARAM))
    }
}

impl ContentExtractor for PlayStoreStrategy {
    fn extract_websites(&self, html: &str) -> Result<Vec<String>, ExtractionError> {
        let document = Html::parse_document(html);
        let row = selector(SUPPORT_ROW)?;
        let label = selector(ROW_LABEL)?;
        let value = selector(ROW_VALUE)?;

        let mut found = false;
        let mut urls = UniqueUrls::new();
        for element in document.select(&row) {
            found = true;
            let Some(row_label) = element.select(&label).next().map(element_text) else {
                continue;
            };
            if !RECOGNIZED_LABELS.contains(&row_label.as_str()) {
                continue;
            }
            if let Some(row_value) = element.select(&value).next() {
                urls.push(&element_text(row_value));
            }
        }

        if found {
            Ok(urls.into_vec())
        } else {
            Err(ExtractionError::not_found(SUPPORT_ROW))
        }
    }
}

impl SourceStrategy for PlayStoreStrategy {
    fn source_type(&self) -> SourceType {
        SourceType::AppStoreAndroid
    }
}

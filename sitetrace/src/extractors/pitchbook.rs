//! Investment database company profiles.

use scraper::Html;

use super::html::{last_path_segment, parse_result_url, selector, UniqueUrls};
use super::{ContentExtractor, IdentifierExtractor, SourceStrategy};
use crate::core::SourceType;
use crate::errors::ExtractionError;

const WEBSITE_LINK: &str = r#"a.d-block-XL.font-underline[aria-label="Website link"]"#;

/// Strategy for PitchBook profiles (`/profiles/company/<id>`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchbookStrategy;

impl IdentifierExtractor for PitchbookStrategy {
    fn extract_id(&self, result_url: &str) -> Result<String, ExtractionError> {
        let url = parse_result_url(result_url)?;
        match last_path_segment(&url) {
            "" => Err(ExtractionError::missing(result_url, "profile id")),
            id => Ok(id.to_string()),
        }
    }
}

impl ContentExtractor for PitchbookStrategy {
    fn extract_websites(&self, html: &str) -> Result<Vec<String>, ExtractionError> {
        let document = Html::parse_document(html);
        let link = selector(WEBSITE_LINK)?;

        let element = document
            .select(&link)
            .next()
            .ok_or_else(|| ExtractionError::not_found(WEBSITE_LINK))?;

        let mut urls = UniqueUrls::new();
        if let Some(href) = element.value().attr("href") {
            urls.push(href);
        }
        Ok(urls.into_vec())
    }
}

impl SourceStrategy for PitchbookStrategy {
    fn source_type(&self) -> SourceType {
        SourceType::InvestmentDb
    }
}

//! Employer review pages.

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use super::html::{last_path_segment, parse_result_url, selector, UniqueUrls};
use super::{ContentExtractor, IdentifierExtractor, SourceStrategy};
use crate::core::SourceType;
use crate::errors::ExtractionError;

const EMPLOYER_WEBSITE: &str = r#"a[data-test="employer-website"]"#;
const PAGE_SUFFIX: &str = ".htm";
const EMPLOYER_ID_PATTERN: &str = r"EI_IE(\d+)\.";

#[allow(clippy::expect_used)]
static EMPLOYER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMPLOYER_ID_PATTERN).expect("employer id pattern is valid"));

/// Strategy for Glassdoor overview pages.
///
/// Overview URLs embed the numeric employer id as
/// `Working-at-Foo-EI_IE<id>.<start>,<end>.htm`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlassdoorStrategy;

impl IdentifierExtractor for GlassdoorStrategy {
    fn extract_id(&self, result_url: &str) -> Result<String, ExtractionError> {
        let url = parse_result_url(result_url)?;
        let segment = last_path_segment(&url);
        let segment = segment.strip_suffix(PAGE_SUFFIX).unwrap_or(segment);

        EMPLOYER_ID
            .captures(segment)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExtractionError::PatternNotFound {
                segment: segment.to_string(),
                pattern: EMPLOYER_ID_PATTERN.to_string(),
            })
    }
}

impl ContentExtractor for GlassdoorStrategy {
    fn extract_websites(&self, html: &str) -> Result<Vec<String>, ExtractionError> {
        let document = Html::parse_document(html);
        let link = selector(EMPLOYER_WEBSITE)?;

        let element = document
            .select(&link)
            .next()
            .ok_or_else(|| ExtractionError::not_found(EMPLOYER_WEBSITE))?;

        let mut urls = UniqueUrls::new();
        if let Some(href) = element.value().attr("href") {
            urls.push(href);
        }
        Ok(urls.into_vec())
    }
}

impl SourceStrategy for GlassdoorStrategy {
    fn source_type(&self) -> SourceType {
        SourceType::ReviewSite
    }
}

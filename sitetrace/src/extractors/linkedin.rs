//! Professional network company pages.

use scraper::Html;

use super::html::{element_text, last_path_segment, parse_result_url, selector, UniqueUrls};
use super::{ContentExtractor, IdentifierExtractor, SourceStrategy};
use crate::core::SourceType;
use crate::errors::ExtractionError;

/// Anchor carrying the company website in the "About" card.
const WEBSITE_ANCHOR: &str = r#"a[data-tracking-control-name="about_website"]"#;

/// Strategy for LinkedIn company pages.
///
/// The identifier is the company slug (`/company/<slug>`); the website is the
/// visible text of the about-card link, since its `href` is a tracking redirect.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedInStrategy;

impl IdentifierExtractor for LinkedInStrategy {
    fn extract_id(&self, result_url: &str) -> Result<String, ExtractionError> {
        let url = parse_result_url(result_url)?;
        match last_path_segment(&url) {
            "" => Err(ExtractionError::missing(result_url, "company slug")),
            slug => Ok(slug.to_string()),
        }
    }
}

impl ContentExtractor for LinkedInStrategy {
    fn extract_websites(&self, html: &str) -> Result<Vec<String>, ExtractionError> {
        let document = Html::parse_document(html);
        let anchor = selector(WEBSITE_ANCHOR)?;

        let mut found = false;
        let mut urls = UniqueUrls::new();
        for element in document.select(&anchor) {
            found = true;
            urls.push(&element_text(element));
        }

        if found {
            Ok(urls.into_vec())
        } else {
            Err(ExtractionError::not_found(WEBSITE_ANCHOR))
        }
    }
}

impl SourceStrategy for LinkedInStrategy {
    fn source_type(&self) -> SourceType {
        SourceType::ProfessionalNetwork
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id() {
        let s = LinkedInStrategy;
        assert_eq!(s.extract_id("https://www.linkedin.com/company/acme-corp").unwrap(), "acme-corp");
        assert_eq!(s.extract_id("https://www.linkedin.com/company/acme-corp/").unwrap(), "acme-corp");
        assert_eq!(s.extract_id("https://www.linkedin.com/company/acme-corp//").unwrap(), "acme-corp");
    }

    #[test]
    fn test_extract_id_failures() {
        let s = LinkedInStrategy;
        assert_eq!(s.extract_id("linkedin company").unwrap_err().kind(), "MalformedURL");
        assert_eq!(
            s.extract_id("https://www.linkedin.com/").unwrap_err().kind(),
            "MissingIdentifier"
        );
    }

    #[test]
    fn test_extract_websites() {
        let html = r#"
            <dl>
              <dt>Website</dt>
              <dd><a href="https://www.linkedin.com/redir/redirect?url=x"
                     data-tracking-control-name="about_website">
                  https://acme.example
              </a></dd>
            </dl>"#;

        assert_eq!(
            LinkedInStrategy.extract_websites(html).unwrap(),
            vec!["https://acme.example"]
        );
    }

    #[test]
    fn test_extract_websites_missing_marker() {
        let err = LinkedInStrategy
            .extract_websites("<html><body>Sign in to continue</body></html>")
            .unwrap_err();
        assert_eq!(err.kind(), "ExtractionNotFound");
    }
}

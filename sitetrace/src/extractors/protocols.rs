//! Capability traits implemented by every directory strategy.

use crate::core::SourceType;
use crate::errors::ExtractionError;

/// Parses a result-page URL into a directory-specific stable identifier.
pub trait IdentifierExtractor: Send + Sync {
    /// Extracts the identifier from `result_url`.
    fn extract_id(&self, result_url: &str) -> Result<String, ExtractionError>;
}

/// Parses a fetched directory page into candidate website URLs.
pub trait ContentExtractor: Send + Sync {
    /// Extracts candidate websites from an HTML document.
    ///
    /// Fails with [`ExtractionError::ExtractionNotFound`] when the page lacks
    /// the structural marker this directory uses. A page that has the marker
    /// but lists no recognized website yields `Ok(vec![])`.
    fn extract_websites(&self, html: &str) -> Result<Vec<String>, ExtractionError>;
}

/// Both capabilities for one source type.
pub trait SourceStrategy: IdentifierExtractor + ContentExtractor {
    /// The source type this strategy handles.
    fn source_type(&self) -> SourceType;
}

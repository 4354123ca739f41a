//! Error types for website resolution.
//!
//! The taxonomy is split by scope: [`ExtractionError`] covers the pure
//! per-page steps (URL parsing, identifier and content extraction, domain
//! normalization), [`TransportError`] covers fetches, and [`ResolveError`]
//! wraps both with the context of the stage that failed. Every variant is
//! recoverable; the orchestrator turns them into error-sink entries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for resolution operations.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The search engine results page could not be fetched.
    #[error("search fetch failed for {url}: {source}")]
    SearchFetchFailed {
        /// The search URL that was requested.
        url: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// A directory page could not be fetched.
    #[error("fetch failed for {url}: {source}")]
    FetchFailed {
        /// The result URL that was requested.
        url: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The stable identifier could not be parsed from a result URL.
    #[error("identifier extraction failed for {url}: {source}")]
    IdentifierExtractionFailed {
        /// The result URL.
        url: String,
        /// The extraction failure.
        #[source]
        source: ExtractionError,
    },

    /// No candidate websites could be extracted from a directory page.
    #[error("content extraction failed for {url}: {source}")]
    ContentExtractionFailed {
        /// The result URL whose document was inspected.
        url: String,
        /// The extraction failure.
        #[source]
        source: ExtractionError,
    },

    /// A candidate website or known domain could not be normalized.
    #[error("{source}")]
    Normalization {
        /// The directory page the value came from, for candidate websites.
        result_url: Option<String>,
        /// The normalization failure.
        #[source]
        source: ExtractionError,
    },

    /// The input record named a source type that has no strategy.
    #[error("unknown source type '{0}'")]
    UnknownSourceType(String),

    /// A record task terminated abnormally.
    #[error("record task failed: {0}")]
    TaskFailed(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input file could not be parsed.
    #[error("input error: {0}")]
    Input(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Returns the taxonomy name of this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SearchFetchFailed { .. } => "SearchFetchFailed",
            Self::FetchFailed { .. } => "FetchFailed",
            Self::IdentifierExtractionFailed { .. } => "IdentifierExtractionFailed",
            Self::ContentExtractionFailed { .. } => "ContentExtractionFailed",
            Self::Normalization { source, .. } => source.kind(),
            Self::UnknownSourceType(_) => "UnknownSourceType",
            Self::TaskFailed(_) => "TaskFailed",
            Self::Config(_) => "Config",
            Self::Input(_) => "Input",
            Self::Io(_) => "Io",
        }
    }

    /// Returns the result URL the error is scoped to, if any.
    #[must_use]
    pub fn result_url(&self) -> Option<&str> {
        match self {
            Self::FetchFailed { url, .. }
            | Self::IdentifierExtractionFailed { url, .. }
            | Self::ContentExtractionFailed { url, .. } => Some(url),
            Self::Normalization { result_url, .. } => result_url.as_deref(),
            _ => None,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(self.kind()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        if let Some(url) = self.result_url() {
            map.insert("result_url".to_string(), serde_json::json!(url));
        }
        map
    }
}

/// Errors raised by the pure extraction and normalization functions.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ExtractionError {
    /// The input could not be parsed as a URL with a usable host.
    #[error("malformed URL '{url}': {reason}")]
    MalformedUrl {
        /// The offending input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required identifier component is absent from the URL.
    #[error("missing identifier '{component}' in {url}")]
    MissingIdentifier {
        /// The URL that was inspected.
        url: String,
        /// The component that was expected (query parameter or path segment).
        component: String,
    },

    /// The embedded identifier pattern did not match.
    #[error("pattern {pattern} not found in '{segment}'")]
    PatternNotFound {
        /// The path segment that was searched.
        segment: String,
        /// The expected pattern.
        pattern: String,
    },

    /// The structural marker the extractor keys on is absent.
    #[error("marker {marker} not found in document")]
    ExtractionNotFound {
        /// The CSS selector of the missing marker.
        marker: String,
    },

    /// A CSS selector failed to compile.
    #[error("invalid selector {0}")]
    InvalidSelector(String),
}

impl ExtractionError {
    /// Creates a malformed URL error.
    #[must_use]
    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing identifier error.
    #[must_use]
    pub fn missing(url: impl Into<String>, component: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            url: url.into(),
            component: component.into(),
        }
    }

    /// Creates an extraction-not-found error for a marker.
    #[must_use]
    pub fn not_found(marker: impl Into<String>) -> Self {
        Self::ExtractionNotFound {
            marker: marker.into(),
        }
    }

    /// Returns the taxonomy name of this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedUrl { .. } => "MalformedURL",
            Self::MissingIdentifier { .. } => "MissingIdentifier",
            Self::PatternNotFound { .. } => "PatternNotFound",
            Self::ExtractionNotFound { .. } => "ExtractionNotFound",
            Self::InvalidSelector(_) => "InvalidSelector",
        }
    }
}

/// Errors raised by the transport collaborator.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The fetch exceeded its time budget.
    #[error("timed out after {timeout_seconds}s")]
    Timeout {
        /// The budget that was exceeded.
        timeout_seconds: f64,
    },

    /// The request could not be completed.
    #[error("request error: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body exceeded the configured limit.
    #[error("response too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Observed size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The HTTP client could not be built.
    #[error("client error: {0}")]
    Client(String),
}

impl TransportError {
    /// Whether this failure was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

//! Protocol traits for transport components.

use async_trait::async_trait;
use std::fmt;

use crate::errors::TransportError;

/// Which proxy a fetch is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyProfile {
    /// Search engine result pages.
    Search,
    /// Directory pages behind bot protection.
    Unblocking,
}

impl ProxyProfile {
    /// Returns the profile name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Unblocking => "unblocking",
        }
    }
}

impl fmt::Display for ProxyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub text: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// Content type from headers.
    pub content_type: Option<String>,
    /// Time taken to fetch in milliseconds.
    pub duration_ms: f64,
}

impl FetchResult {
    /// Creates a 200 response for `url` with the given body.
    #[must_use]
    pub fn ok(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            text: text.into(),
            final_url: url.into(),
            content_type: Some("text/html".to_string()),
            duration_ms: 0.0,
        }
    }

    /// Whether the response is HTML.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
    }

    /// Whether the fetch was successful (2xx status).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns the body of a successful response, or a status error.
    pub fn into_text(self) -> Result<String, TransportError> {
        if self.is_success() {
            Ok(self.text)
        } else {
            Err(TransportError::Status(self.status_code))
        }
    }
}

/// Protocol for page fetching.
///
/// Implementations route each request through the proxy for `profile`.
/// Timeouts are reported as [`TransportError::Timeout`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL and returns the result.
    async fn fetch(
        &self,
        url: &str,
        profile: ProxyProfile,
        timeout: Option<f64>,
    ) -> Result<FetchResult, TransportError>;
}

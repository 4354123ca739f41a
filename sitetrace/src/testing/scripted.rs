//! Scripted fetcher for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::TransportError;
use crate::transport::{FetchResult, Fetcher, ProxyProfile};

/// A scripted response for one URL.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// A 200 response with this body.
    Page(String),
    /// A response with this status and an empty body.
    Status(u16),
    /// A transport failure.
    Error(TransportError),
    /// A response that arrives only after this delay.
    Delayed(Duration, String),
}

/// A fetcher answering from a URL-keyed script and recording every call.
///
/// Unscripted URLs fail with a 404 status.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    script: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(String, ProxyProfile)>>,
}

impl ScriptedFetcher {
    /// Creates an empty scripted fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a 200 response.
    #[must_use]
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.script(url, Scripted::Page(html.into()))
    }

    /// Scripts a transport failure.
    #[must_use]
    pub fn with_error(self, url: impl Into<String>, error: TransportError) -> Self {
        self.script(url, Scripted::Error(error))
    }

    /// Scripts any response.
    #[must_use]
    pub fn script(self, url: impl Into<String>, response: Scripted) -> Self {
        self.script.lock().insert(url.into(), response);
        self
    }

    /// Returns every (url, profile) fetched, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, ProxyProfile)> {
        self.calls.lock().clone()
    }

    /// Returns the number of fetches made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(
        &self,
        url: &str,
        profile: ProxyProfile,
        _timeout: Option<f64>,
    ) -> Result<FetchResult, TransportError> {
        self.calls.lock().push((url.to_string(), profile));
        let response = self.script.lock().get(url).cloned();

        match response {
            Some(Scripted::Page(html)) => Ok(FetchResult::ok(url, html)),
            Some(Scripted::Status(status)) => {
                let mut result = FetchResult::ok(url, "");
                result.status_code = status;
                Ok(result)
            }
            Some(Scripted::Error(error)) => Err(error),
            Some(Scripted::Delayed(delay, html)) => {
                tokio::time::sleep(delay).await;
                Ok(FetchResult::ok(url, html))
            }
            None => {
                let mut result = FetchResult::ok(url, "");
                result.status_code = 404;
                Ok(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses() {
        let fetcher = ScriptedFetcher::new()
            .with_page("https://a.test", "<p>a</p>")
            .with_error("https://b.test", TransportError::Timeout { timeout_seconds: 15.0 });

        let page = fetcher
            .fetch("https://a.test", ProxyProfile::Unblocking, None)
            .await
            .unwrap();
        assert_eq!(page.text, "<p>a</p>");

        let err = fetcher
            .fetch("https://b.test", ProxyProfile::Unblocking, None)
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        let missing = fetcher
            .fetch("https://c.test", ProxyProfile::Search, None)
            .await
            .unwrap();
        assert_eq!(missing.status_code, 404);

        assert_eq!(fetcher.call_count(), 3);
        assert_eq!(fetcher.calls()[2], ("https://c.test".to_string(), ProxyProfile::Search));
    }

    #[test]
    fn test_status_response_blocking() {
        let fetcher = ScriptedFetcher::new().script("https://d.test", Scripted::Status(429));
        let result =
            tokio_test::block_on(fetcher.fetch("https://d.test", ProxyProfile::Search, Some(1.0)))
                .unwrap();

        assert!(!result.is_success());
        assert!(matches!(result.into_text(), Err(TransportError::Status(429))));
    }
}

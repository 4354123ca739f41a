//! `reqwest`-backed fetcher with one client per proxy profile.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect, Client, Proxy};
use std::time::{Duration, Instant};
use tracing::debug;

use super::protocols::{FetchResult, Fetcher, ProxyProfile};
use crate::config::{FetchConfig, ProxyConfig};
use crate::errors::TransportError;

/// HTTP fetcher routing each profile through its configured proxy.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    config: FetchConfig,
    search: Client,
    unblocking: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from fetch and proxy settings.
    pub fn new(config: FetchConfig, proxies: &ProxyConfig) -> Result<Self, TransportError> {
        let search = build_client(&config, proxies.for_profile(ProxyProfile::Search))?;
        let unblocking = build_client(&config, proxies.for_profile(ProxyProfile::Unblocking))?;
        Ok(Self {
            config,
            search,
            unblocking,
        })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn client(&self, profile: ProxyProfile) -> &Client {
        match profile {
            ProxyProfile::Search => &self.search,
            ProxyProfile::Unblocking => &self.unblocking,
        }
    }
}

fn build_client(config: &FetchConfig, proxy: Option<&str>) -> Result<Client, TransportError> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| TransportError::Client(format!("invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::Client(format!("invalid header value for '{key}': {e}")))?;
        headers.insert(name, value);
    }

    let timeout = config
        .timeout()
        .map_err(|e| TransportError::Client(e.to_string()))?;

    let mut builder = Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .redirect(redirect::Policy::limited(config.max_redirects))
        .danger_accept_invalid_certs(!config.verify_ssl);

    if let Some(proxy_url) = proxy {
        let proxy = Proxy::all(proxy_url)
            .map_err(|e| TransportError::Client(format!("invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| TransportError::Client(format!("failed to create HTTP client: {e}")))
}

fn map_request_error(error: &reqwest::Error, timeout_seconds: f64) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout { timeout_seconds }
    } else {
        TransportError::Request(error.to_string())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        profile: ProxyProfile,
        timeout: Option<f64>,
    ) -> Result<FetchResult, TransportError> {
        let timeout_seconds = timeout.unwrap_or(self.config.timeout_seconds);
        let request_timeout = Duration::try_from_secs_f64(timeout_seconds).map_err(|e| {
            TransportError::Request(format!("invalid timeout {timeout_seconds}: {e}"))
        })?;
        let start = Instant::now();

        let response = self
            .client(profile)
            .get(url)
            .timeout(request_timeout)
            .send()
            .await
            .map_err(|e| map_request_error(&e, timeout_seconds))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let limit = self.config.max_response_size;
        if let Some(size) = response.content_length() {
            let size = usize::try_from(size).unwrap_or(usize::MAX);
            if size > limit {
                return Err(TransportError::TooLarge { size, limit });
            }
        }

        let text = response
            .text()
            .await
            .map_err(|e| map_request_error(&e, timeout_seconds))?;
        if text.len() > limit {
            return Err(TransportError::TooLarge {
                size: text.len(),
                limit,
            });
        }

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(url, %profile, status_code, duration_ms, "fetched");

        Ok(FetchResult {
            status_code,
            text,
            final_url,
            content_type,
            duration_ms,
        })
    }
}

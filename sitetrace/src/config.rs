//! Configuration types for resolution runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::errors::ResolveError;
use crate::transport::ProxyProfile;

/// Environment variable overriding the search proxy URL.
pub const ENV_SEARCH_PROXY: &str = "SITETRACE_SEARCH_PROXY";
/// Environment variable overriding the unblocking proxy URL.
pub const ENV_UNBLOCKING_PROXY: &str = "SITETRACE_UNBLOCKING_PROXY";
/// Environment variable overriding the per-fetch timeout in seconds.
pub const ENV_FETCH_TIMEOUT: &str = "SITETRACE_FETCH_TIMEOUT";

/// Configuration for HTTP fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-fetch timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whether to verify TLS certificates.
    ///
    /// Unblocking proxies that re-sign traffic need this off.
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    /// Maximum response size in bytes.
    #[serde(default = "default_max_size")]
    pub max_response_size: usize,
    /// Additional headers to include.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout() -> f64 {
    15.0
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    concat!("sitetrace/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_verify_ssl() -> bool {
    true
}

fn default_max_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            verify_ssl: default_verify_ssl(),
            max_response_size: default_max_size(),
            headers: HashMap::new(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Disables TLS certificate verification.
    #[must_use]
    pub fn without_ssl_verification(mut self) -> Self {
        self.verify_ssl = false;
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Fails for zero, negative, non-finite, or out-of-range values.
    pub fn timeout(&self) -> Result<Duration, ResolveError> {
        match Duration::try_from_secs_f64(self.timeout_seconds) {
            Ok(timeout) if !timeout.is_zero() => Ok(timeout),
            Ok(_) => Err(ResolveError::Config(format!(
                "fetch timeout must be positive, got {}",
                self.timeout_seconds
            ))),
            Err(e) => Err(ResolveError::Config(format!(
                "fetch timeout {} is not a usable duration: {e}",
                self.timeout_seconds
            ))),
        }
    }
}

/// Proxy URLs per call-site profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy for search engine requests.
    #[serde(default)]
    pub search: Option<String>,
    /// Proxy for directory page requests.
    #[serde(default)]
    pub unblocking: Option<String>,
}

impl ProxyConfig {
    /// Returns the proxy URL for a profile.
    #[must_use]
    pub fn for_profile(&self, profile: ProxyProfile) -> Option<&str> {
        match profile {
            ProxyProfile::Search => self.search.as_deref(),
            ProxyProfile::Unblocking => self.unblocking.as_deref(),
        }
    }
}

/// Search engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// URL prefix the encoded query is appended to.
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    /// CSS class of the organic-result container.
    #[serde(default = "default_result_container_class")]
    pub result_container_class: String,
}

fn default_search_base_url() -> String {
    "https://www.google.com/search?q=".to_string()
}

fn default_result_container_class() -> String {
    "yuRUbf".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            result_container_class: default_result_container_class(),
        }
    }
}

/// Combined configuration for a resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Records resolved concurrently.
    #[serde(default = "default_concurrent_records")]
    pub max_concurrent_records: usize,
    /// Search results resolved concurrently within one record.
    #[serde(default = "default_concurrent_results")]
    pub max_concurrent_results: usize,
    /// Fetches in flight across the whole run.
    #[serde(default = "default_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    /// Fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Search configuration.
    #[serde(default)]
    pub search: SearchConfig,
    /// Proxy configuration.
    #[serde(default)]
    pub proxies: ProxyConfig,
}

fn default_concurrent_records() -> usize {
    5
}

fn default_concurrent_results() -> usize {
    1
}

fn default_concurrent_fetches() -> usize {
    10
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent_records: default_concurrent_records(),
            max_concurrent_results: default_concurrent_results(),
            max_concurrent_fetches: default_concurrent_fetches(),
            fetch: FetchConfig::default(),
            search: SearchConfig::default(),
            proxies: ProxyConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Creates a new resolver configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ResolveError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ResolveError::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ResolveError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Sets the number of records resolved concurrently.
    #[must_use]
    pub fn with_max_concurrent_records(mut self, max: usize) -> Self {
        self.max_concurrent_records = max;
        self
    }

    /// Sets the number of results resolved concurrently per record.
    #[must_use]
    pub fn with_max_concurrent_results(mut self, max: usize) -> Self {
        self.max_concurrent_results = max;
        self
    }

    /// Sets the number of fetches in flight across the run.
    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max;
        self
    }

    /// Sets the fetch configuration.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Sets the proxy configuration.
    #[must_use]
    pub fn with_proxies(mut self, proxies: ProxyConfig) -> Self {
        self.proxies = proxies;
        self
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ResolveError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from a key lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ResolveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(proxy) = lookup(ENV_SEARCH_PROXY).filter(|v| !v.trim().is_empty()) {
            self.proxies.search = Some(proxy);
        }
        if let Some(proxy) = lookup(ENV_UNBLOCKING_PROXY).filter(|v| !v.trim().is_empty()) {
            self.proxies.unblocking = Some(proxy);
        }
        if let Some(timeout) = lookup(ENV_FETCH_TIMEOUT) {
            self.fetch.timeout_seconds = timeout.trim().parse().map_err(|_| {
                ResolveError::Config(format!("{ENV_FETCH_TIMEOUT} is not a number: {timeout}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks limits that would stall or disable a run.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.max_concurrent_records == 0
            || self.max_concurrent_results == 0
            || self.max_concurrent_fetches == 0
        {
            return Err(ResolveError::Config(
                "concurrency limits must be at least 1".to_string(),
            ));
        }
        self.fetch.timeout()?;
        Ok(())
    }
}

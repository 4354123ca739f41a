//! Public-suffix-aware registrable domain extraction.

use std::fmt;
use tldextract::{TldExtractor, TldOption};
use url::{Host, Url};

use crate::errors::ExtractionError;

/// Reduces URLs to `label.suffix` registrable domains.
///
/// Built once per run and shared; the suffix list is the snapshot bundled
/// with `tldextract`, so construction never touches the network.
pub struct DomainNormalizer {
    extractor: TldExtractor,
}

impl DomainNormalizer {
    /// Creates a normalizer backed by the bundled public suffix list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractor: TldExtractor::new(TldOption::default()),
        }
    }

    /// Returns the registrable domain of `input`.
    ///
    /// Accepts full URLs as well as bare hosts (`example.com`) and
    /// `user@host` strings, which is how directories list contact emails.
    pub fn normalize(&self, input: &str) -> Result<String, ExtractionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ExtractionError::malformed(input, "empty input"));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed.trim_start_matches('/'))
        };

        let parsed = Url::parse(&candidate)
            .map_err(|e| ExtractionError::malformed(input, e.to_string()))?;

        let host = match parsed.host() {
            Some(Host::Domain(host)) => host.trim_end_matches('.').to_string(),
            Some(Host::Ipv4(_) | Host::Ipv6(_)) => {
                return Err(ExtractionError::malformed(
                    input,
                    "IP addresses have no registrable domain",
                ));
            }
            None => return Err(ExtractionError::malformed(input, "no host")),
        };

        let result = self
            .extractor
            .extract(&format!("http://{host}/"))
            .map_err(|e| ExtractionError::malformed(input, e.to_string()))?;

        match (result.domain, result.suffix) {
            (Some(domain), Some(suffix)) if !domain.is_empty() && !suffix.is_empty() => {
                Ok(format!("{domain}.{suffix}").to_lowercase())
            }
            _ => Err(ExtractionError::malformed(
                input,
                format!("'{host}' has no registrable domain"),
            )),
        }
    }

    /// Whether two inputs share a registrable domain.
    ///
    /// Returns `false` when either side fails to normalize.
    #[must_use]
    pub fn same_registrable_domain(&self, a: &str, b: &str) -> bool {
        match (self.normalize(a), self.normalize(b)) {
            (Ok(x), Ok(y)) => x == y,
            _ => false,
        }
    }
}

impl Default for DomainNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DomainNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainNormalizer").finish_non_exhaustive()
    }
}

/// Strips every trailing `/`. Idempotent.
#[must_use]
pub fn normalize_path(s: &str) -> &str {
    s.trim_end_matches('/')
}

//! Records flowing through a resolution run.

use serde::{Deserialize, Serialize};

use super::SourceType;
use crate::errors::ResolveError;

/// An input row as it arrives on the wire, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputRecord {
    /// The company's known domain.
    pub domain: String,
    /// Caller-assigned company identifier.
    pub company_id: String,
    /// Source type wire name.
    pub entity: String,
    /// Query text for the search engine.
    pub google_query: String,
}

impl RawInputRecord {
    /// Creates a raw record.
    #[must_use]
    pub fn new(
        company_id: impl Into<String>,
        domain: impl Into<String>,
        entity: impl Into<String>,
        google_query: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            company_id: company_id.into(),
            entity: entity.into(),
            google_query: google_query.into(),
        }
    }
}

/// A validated input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Caller-assigned company identifier.
    pub company_id: String,
    /// The company's known domain.
    pub domain: String,
    /// Which directory to resolve against.
    pub source_type: SourceType,
    /// Query text for the search engine.
    pub search_query: String,
}

impl InputRecord {
    /// Creates a validated record.
    #[must_use]
    pub fn new(
        company_id: impl Into<String>,
        domain: impl Into<String>,
        source_type: SourceType,
        search_query: impl Into<String>,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            domain: domain.into(),
            source_type,
            search_query: search_query.into(),
        }
    }
}

impl TryFrom<RawInputRecord> for InputRecord {
    type Error = ResolveError;

    fn try_from(raw: RawInputRecord) -> Result<Self, Self::Error> {
        let source_type = raw.entity.parse()?;
        Ok(Self {
            company_id: raw.company_id,
            domain: raw.domain,
            source_type,
            search_query: raw.google_query,
        })
    }
}

/// A candidate directory page URL from the search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The result URL.
    pub url: String,
}

impl SearchResult {
    /// Creates a search result.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Working state for one (record, search result) pair.
#[derive(Debug, Clone, Default)]
pub struct ResolutionAttempt {
    /// The result URL being resolved.
    pub result_url: String,
    /// The fetched directory page.
    pub document: Option<String>,
    /// Identifier parsed from the result URL.
    pub stable_identifier: Option<String>,
    /// Websites claimed on the page.
    pub candidate_websites: Vec<String>,
}

impl ResolutionAttempt {
    /// Starts an attempt for a result URL.
    #[must_use]
    pub fn new(result_url: impl Into<String>) -> Self {
        Self {
            result_url: result_url.into(),
            ..Default::default()
        }
    }
}

/// One resolved candidate website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Caller-assigned company identifier.
    pub company_id: String,
    /// Directory the row came from.
    pub source_type: SourceType,
    /// The company's known domain, as supplied.
    pub known_domain: String,
    /// The directory page the website was found on.
    pub result_url: String,
    /// Directory-specific identifier parsed from the result URL.
    pub stable_identifier: String,
    /// The website claimed on the page.
    pub candidate_website: String,
    /// Registrable domain of the candidate website.
    pub candidate_domain: String,
    /// Whether the candidate's registrable domain equals the known one.
    pub domain_match: bool,
}

impl OutputRow {
    /// Renders the per-source output line (without trailing newline).
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}, {}, {}, \"{}\", {}, {}, {}, {}",
            self.company_id,
            self.source_type,
            self.known_domain,
            self.result_url,
            self.stable_identifier,
            self.candidate_website,
            self.candidate_domain,
            if self.domain_match { "True" } else { "False" },
        )
    }
}

/// An error-sink entry with enough context to reproduce the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Caller-assigned company identifier.
    pub company_id: String,
    /// The company's known domain.
    pub known_domain: String,
    /// Source type as supplied on the wire.
    pub source: String,
    /// Query text for the search engine.
    pub search_query: String,
    /// Result URL, for per-result failures.
    pub result_url: Option<String>,
    /// Taxonomy name of the failure.
    pub error_kind: String,
    /// Human-readable failure detail.
    pub detail: String,
}

impl ErrorEntry {
    /// Builds an entry for a validated record.
    #[must_use]
    pub fn for_record(record: &InputRecord, error: &ResolveError) -> Self {
        Self {
            company_id: record.company_id.clone(),
            known_domain: record.domain.clone(),
            source: record.source_type.as_str().to_string(),
            search_query: record.search_query.clone(),
            result_url: error.result_url().map(String::from),
            error_kind: error.kind().to_string(),
            detail: error.to_string(),
        }
    }

    /// Builds an entry for a record that failed validation.
    #[must_use]
    pub fn for_raw(raw: &RawInputRecord, error: &ResolveError) -> Self {
        Self {
            company_id: raw.company_id.clone(),
            known_domain: raw.domain.clone(),
            source: raw.entity.clone(),
            search_query: raw.google_query.clone(),
            result_url: error.result_url().map(String::from),
            error_kind: error.kind().to_string(),
            detail: error.to_string(),
        }
    }

    /// Renders the error line (without trailing newline).
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "{}, {}, {}, {}",
            self.company_id, self.known_domain, self.source, self.search_query
        );
        if let Some(ref url) = self.result_url {
            line.push_str(", ");
            line.push_str(url);
        }
        line.push_str(": ");
        line.push_str(&self.detail);
        line
    }
}

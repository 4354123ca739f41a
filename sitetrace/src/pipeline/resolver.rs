//! Resolution orchestrator.
//!
//! Drives each record through search, per-result fetch, identifier and
//! content extraction, and domain matching. Failures are contained at the
//! result or record boundary, written to the error stream, and never stop
//! sibling work.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::pin::pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::outcome::{BatchSummary, RecordOutcome, RecordStatus};
use crate::config::ResolverConfig;
use crate::core::{
    ErrorEntry, InputRecord, OutputRow, RawInputRecord, ResolutionAttempt, SearchResult,
};
use crate::domain::DomainNormalizer;
use crate::errors::{ResolveError, TransportError};
use crate::extractors::{strategy_for, SourceStrategy};
use crate::search::{build_search_url, SerpCollector};
use crate::sinks::OutputSink;
use crate::transport::{Fetcher, ProxyProfile};

/// Everything one search result produced.
#[derive(Debug, Default)]
struct ResultReport {
    result_url: String,
    websites_extracted: bool,
    rows: Vec<OutputRow>,
    errors: Vec<ResolveError>,
}

/// Resolves input records against their directories.
///
/// Cloning is cheap; clones share the fetcher, sink and fetch limiter.
#[derive(Clone)]
pub struct Resolver {
    config: Arc<ResolverConfig>,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn OutputSink>,
    normalizer: Arc<DomainNormalizer>,
    collector: Arc<SerpCollector>,
    fetch_permits: Arc<Semaphore>,
    fetch_timeout: Duration,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Creates a resolver.
    pub fn new(
        config: ResolverConfig,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn OutputSink>,
    ) -> Result<Self, ResolveError> {
        config.validate()?;
        let fetch_timeout = config.fetch.timeout()?;
        let collector = SerpCollector::new(&config.search.result_container_class)
            .map_err(|e| ResolveError::Config(e.to_string()))?;
        let fetch_permits = Arc::new(Semaphore::new(config.max_concurrent_fetches));

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            sink,
            normalizer: Arc::new(DomainNormalizer::new()),
            collector: Arc::new(collector),
            fetch_permits,
            fetch_timeout,
        })
    }

    /// Shares an existing normalizer instead of building a new one.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Arc<DomainNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a batch of raw records.
    ///
    /// Each valid record runs in its own task; at most
    /// `max_concurrent_records` run at once.
    pub async fn run_batch(&self, records: Vec<RawInputRecord>) -> BatchSummary {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();
        info!(%run_id, records = records.len(), "Starting batch");

        let outcomes: Vec<RecordOutcome> = stream::iter(records)
            .map(|raw| self.clone().run_raw(raw))
            .buffer_unordered(self.config.max_concurrent_records)
            .collect()
            .await;

        let duration_seconds = start.elapsed().as_secs_f64();
        self.emit_progress(&format!("Total time taken: {duration_seconds}"));

        let summary = BatchSummary::from_outcomes(run_id, started_at, duration_seconds, outcomes);
        info!(
            %run_id,
            total = summary.total_records,
            completed = summary.completed_records,
            rows = summary.rows_emitted,
            matches = summary.matches,
            errors = summary.error_entries,
            duration_seconds,
            "Batch finished"
        );
        summary
    }

    async fn run_raw(self, raw: RawInputRecord) -> RecordOutcome {
        let record = match InputRecord::try_from(raw.clone()) {
            Ok(record) => record,
            Err(err) => {
                warn!(company_id = %raw.company_id, entity = %raw.entity, "Rejected record: {err}");
                self.emit_error(&ErrorEntry::for_raw(&raw, &err));
                return RecordOutcome::rejected(&raw, &err);
            }
        };

        let resolver = self.clone();
        let task_record = record.clone();
        let handle = tokio::spawn(async move { resolver.resolve_record(&task_record).await });

        match handle.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                let err = ResolveError::TaskFailed(join_error.to_string());
                error!(company_id = %record.company_id, source = %record.source_type, "{err}");
                self.emit_error(&ErrorEntry::for_record(&record, &err));
                RecordOutcome::task_failed(&record, &err)
            }
        }
    }

    /// Resolves one record.
    ///
    /// Never fails: every error is written to the error stream and
    /// reflected in the returned outcome.
    pub async fn resolve_record(&self, record: &InputRecord) -> RecordOutcome {
        let start = Instant::now();
        let mut outcome = RecordOutcome::new(record);

        let search_url = build_search_url(&self.config.search.base_url, &record.search_query);
        let serp = match self.fetch(&search_url, ProxyProfile::Search).await {
            Ok(serp) => serp,
            Err(source) => {
                let err = ResolveError::SearchFetchFailed {
                    url: search_url,
                    source,
                };
                warn!(company_id = %record.company_id, source = %record.source_type, "{err}");
                self.report(record, &err, &mut outcome);
                outcome.status = RecordStatus::SearchFailed;
                outcome.duration_seconds = start.elapsed().as_secs_f64();
                return outcome;
            }
        };

        let results = self.collector.collect(&serp);
        outcome.results_seen = results.len();
        info!(
            company_id = %record.company_id,
            domain = %record.domain,
            source = %record.source_type,
            results = results.len(),
            "Result urls extracted"
        );
        self.emit_progress(&format!(
            "result urls extracted for {}, {}",
            record.domain, record.source_type
        ));

        let known_domain = match self.normalizer.normalize(&record.domain) {
            Ok(domain) => Some(domain),
            Err(source) => {
                let err = ResolveError::Normalization {
                    result_url: None,
                    source,
                };
                warn!(company_id = %record.company_id, "Known domain did not normalize: {err}");
                self.report(record, &err, &mut outcome);
                None
            }
        };

        let strategy = strategy_for(record.source_type);
        let mut reports = pin!(stream::iter(results)
            .map(|result| self.resolve_result(record, strategy, known_domain.as_deref(), result))
            .buffered(self.config.max_concurrent_results));

        while let Some(report) = reports.next().await {
            self.emit_report(record, report, &mut outcome);
        }

        let elapsed = start.elapsed().as_secs_f64();
        outcome.duration_seconds = elapsed;
        info!(
            company_id = %record.company_id,
            source = %record.source_type,
            rows = outcome.rows_emitted,
            matches = outcome.matches,
            elapsed,
            "Record completed"
        );
        self.emit_progress(&format!(
            "{}, {}, Time taken: {elapsed}",
            record.company_id, record.source_type
        ));
        outcome
    }

    async fn resolve_result(
        &self,
        record: &InputRecord,
        strategy: &dyn SourceStrategy,
        known_domain: Option<&str>,
        result: SearchResult,
    ) -> ResultReport {
        let mut attempt = ResolutionAttempt::new(result.url);
        let mut report = ResultReport {
            result_url: attempt.result_url.clone(),
            ..Default::default()
        };

        match self.fetch(&attempt.result_url, ProxyProfile::Unblocking).await {
            Ok(document) => attempt.document = Some(document),
            Err(source) => {
                report.errors.push(ResolveError::FetchFailed {
                    url: attempt.result_url,
                    source,
                });
                return report;
            }
        }

        match strategy.extract_id(&attempt.result_url) {
            Ok(id) => attempt.stable_identifier = Some(id),
            Err(source) => {
                report.errors.push(ResolveError::IdentifierExtractionFailed {
                    url: attempt.result_url,
                    source,
                });
                return report;
            }
        }

        let document = attempt.document.as_deref().unwrap_or_default();
        match strategy.extract_websites(document) {
            Ok(websites) => attempt.candidate_websites = websites,
            Err(source) => {
                report.errors.push(ResolveError::ContentExtractionFailed {
                    url: attempt.result_url,
                    source,
                });
                return report;
            }
        }
        report.websites_extracted = true;

        let stable_identifier = attempt.stable_identifier.unwrap_or_default();
        for website in attempt.candidate_websites {
            match self.normalizer.normalize(&website) {
                Ok(candidate_domain) => {
                    let domain_match = known_domain == Some(candidate_domain.as_str());
                    report.rows.push(OutputRow {
                        company_id: record.company_id.clone(),
                        source_type: record.source_type,
                        known_domain: record.domain.clone(),
                        result_url: attempt.result_url.clone(),
                        stable_identifier: stable_identifier.clone(),
                        candidate_website: website,
                        candidate_domain,
                        domain_match,
                    });
                }
                Err(source) => report.errors.push(ResolveError::Normalization {
                    result_url: Some(attempt.result_url.clone()),
                    source,
                }),
            }
        }
        report
    }

    /// Fetches a page under the shared fetch limit and per-fetch timeout.
    async fn fetch(&self, url: &str, profile: ProxyProfile) -> Result<String, TransportError> {
        let _permit = self
            .fetch_permits
            .acquire()
            .await
            .map_err(|_| TransportError::Request("fetch limiter closed".to_string()))?;

        let timeout_seconds = self.config.fetch.timeout_seconds;
        debug!(url, %profile, "Fetching");
        let fetched = tokio::time::timeout(
            self.fetch_timeout,
            self.fetcher.fetch(url, profile, Some(timeout_seconds)),
        )
        .await
        .map_err(|_| TransportError::Timeout { timeout_seconds })??;

        if fetched.final_url != url {
            debug!(url, final_url = %fetched.final_url, "Fetch redirected");
        }
        if !fetched.is_html() {
            debug!(url, content_type = ?fetched.content_type, "Fetched non-HTML content");
        }
        debug!(url, status_code = fetched.status_code, duration_ms = fetched.duration_ms, "Fetched");
        fetched.into_text()
    }

    fn emit_report(&self, record: &InputRecord, report: ResultReport, outcome: &mut RecordOutcome) {
        if report.websites_extracted {
            debug!(result_url = %report.result_url, rows = report.rows.len(), "Websites extracted");
            self.emit_progress(&format!("websites extracted from {}", report.result_url));
        }

        for row in &report.rows {
            if let Err(err) = self.sink.write_row(row) {
                error!(result_url = %row.result_url, "Failed to write row: {err}");
                continue;
            }
            outcome.rows_emitted += 1;
            if row.domain_match {
                outcome.matches += 1;
            }
        }

        for err in &report.errors {
            warn!(company_id = %record.company_id, source = %record.source_type, "{err}");
            self.report(record, err, outcome);
        }
    }

    fn report(&self, record: &InputRecord, err: &ResolveError, outcome: &mut RecordOutcome) {
        self.emit_error(&ErrorEntry::for_record(record, err));
        outcome.record_failure(err);
    }

    fn emit_error(&self, entry: &ErrorEntry) {
        if let Err(err) = self.sink.write_error(entry) {
            error!(company_id = %entry.company_id, "Failed to write error entry: {err}");
        }
    }

    fn emit_progress(&self, line: &str) {
        if let Err(err) = self.sink.write_progress(line) {
            error!("Failed to write progress line: {err}");
        }
    }
}

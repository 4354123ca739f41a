//! Per-record and per-batch outcome reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::core::{InputRecord, RawInputRecord, SourceType};
use crate::errors::ResolveError;

/// Terminal state of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Search results were processed; per-result failures may exist.
    Completed,
    /// The results page itself could not be fetched.
    SearchFailed,
    /// The record named an unknown source type.
    Rejected,
    /// The record's task terminated abnormally.
    TaskFailed,
}

/// Record of one reported failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Taxonomy name of the error.
    pub error_type: String,
    /// Error message.
    pub error: String,
    /// Result URL for per-result failures.
    pub result_url: Option<String>,
    /// When the failure was reported.
    pub timestamp: DateTime<Utc>,
}

impl FailureRecord {
    /// Creates a failure record from an error.
    #[must_use]
    pub fn from_error(error: &ResolveError) -> Self {
        Self {
            error_type: error.kind().to_string(),
            error: error.to_string(),
            result_url: error.result_url().map(String::from),
            timestamp: Utc::now(),
        }
    }
}

/// What happened to one input record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// Caller-assigned company identifier.
    pub company_id: String,
    /// Resolved source type; absent for rejected records.
    pub source_type: Option<SourceType>,
    /// Terminal state.
    pub status: RecordStatus,
    /// Search results collected from the results page.
    pub results_seen: usize,
    /// Output rows written.
    pub rows_emitted: usize,
    /// Rows whose candidate domain matched the known domain.
    pub matches: usize,
    /// Every failure reported for this record.
    pub failures: Vec<FailureRecord>,
    /// Wall time spent on the record.
    pub duration_seconds: f64,
}

impl RecordOutcome {
    /// Starts a completed outcome for a record.
    #[must_use]
    pub fn new(record: &InputRecord) -> Self {
        Self {
            company_id: record.company_id.clone(),
            source_type: Some(record.source_type),
            status: RecordStatus::Completed,
            results_seen: 0,
            rows_emitted: 0,
            matches: 0,
            failures: Vec::new(),
            duration_seconds: 0.0,
        }
    }

    /// Outcome for a record rejected at validation.
    #[must_use]
    pub fn rejected(raw: &RawInputRecord, error: &ResolveError) -> Self {
        Self {
            company_id: raw.company_id.clone(),
            source_type: None,
            status: RecordStatus::Rejected,
            results_seen: 0,
            rows_emitted: 0,
            matches: 0,
            failures: vec![FailureRecord::from_error(error)],
            duration_seconds: 0.0,
        }
    }

    /// Outcome for a record whose task terminated abnormally.
    #[must_use]
    pub fn task_failed(record: &InputRecord, error: &ResolveError) -> Self {
        let mut outcome = Self::new(record);
        outcome.status = RecordStatus::TaskFailed;
        outcome.failures.push(FailureRecord::from_error(error));
        outcome
    }

    /// Records a reported failure.
    pub fn record_failure(&mut self, error: &ResolveError) {
        self.failures.push(FailureRecord::from_error(error));
    }

    /// Whether the record reached [`RecordStatus::Completed`].
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == RecordStatus::Completed
    }
}

/// Summary of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Records in the batch.
    pub total_records: usize,
    /// Records that reached completion.
    pub completed_records: usize,
    /// Records that did not.
    pub failed_records: usize,
    /// Output rows written.
    pub rows_emitted: usize,
    /// Rows with a domain match.
    pub matches: usize,
    /// Error entries written.
    pub error_entries: usize,
    /// Wall time of the whole run.
    pub duration_seconds: f64,
    /// Per-record outcomes, in completion order.
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchSummary {
    /// Builds a summary from record outcomes.
    #[must_use]
    pub fn from_outcomes(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        duration_seconds: f64,
        outcomes: Vec<RecordOutcome>,
    ) -> Self {
        let completed_records = outcomes.iter().filter(|o| o.is_completed()).count();
        Self {
            run_id,
            started_at,
            total_records: outcomes.len(),
            completed_records,
            failed_records: outcomes.len() - completed_records,
            rows_emitted: outcomes.iter().map(|o| o.rows_emitted).sum(),
            matches: outcomes.iter().map(|o| o.matches).sum(),
            error_entries: outcomes.iter().map(|o| o.failures.len()).sum(),
            duration_seconds,
            outcomes,
        }
    }

    /// Returns the share of records that completed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        self.completed_records as f64 / self.total_records as f64
    }

    /// Returns true if any error entries were written.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.error_entries > 0
    }

    /// Converts to dictionary.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("run_id".to_string(), serde_json::json!(self.run_id));
        map.insert("started_at".to_string(), serde_json::json!(self.started_at));
        map.insert("total_records".to_string(), serde_json::json!(self.total_records));
        map.insert("completed_records".to_string(), serde_json::json!(self.completed_records));
        map.insert("failed_records".to_string(), serde_json::json!(self.failed_records));
        map.insert("rows_emitted".to_string(), serde_json::json!(self.rows_emitted));
        map.insert("matches".to_string(), serde_json::json!(self.matches));
        map.insert("error_entries".to_string(), serde_json::json!(self.error_entries));
        map.insert("success_rate".to_string(), serde_json::json!(self.success_rate()));
        map.insert("duration_seconds".to_string(), serde_json::json!(self.duration_seconds));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;

    fn record() -> InputRecord {
        InputRecord::new("1", "example.com", SourceType::InvestmentDb, "example pitchbook")
    }

    #[test]
    fn test_failure_record_from_error() {
        let err = ResolveError::FetchFailed {
            url: "https://pitchbook.com/profiles/company/1-2".to_string(),
            source: TransportError::Status(403),
        };
        let failure = FailureRecord::from_error(&err);

        assert_eq!(failure.error_type, "FetchFailed");
        assert_eq!(
            failure.result_url.as_deref(),
            Some("https://pitchbook.com/profiles/company/1-2")
        );
    }

    #[test]
    fn test_rejected_outcome() {
        let raw = RawInputRecord::new("9", "example.com", "myspace", "q");
        let err = ResolveError::UnknownSourceType("myspace".to_string());
        let outcome = RecordOutcome::rejected(&raw, &err);

        assert_eq!(outcome.status, RecordStatus::Rejected);
        assert_eq!(outcome.source_type, None);
        assert_eq!(outcome.failures.len(), 1);
    }

    #[test]
    fn test_summary_counts() {
        let mut completed = RecordOutcome::new(&record());
        completed.rows_emitted = 3;
        completed.matches = 2;
        completed.record_failure(&ResolveError::TaskFailed("x".to_string()));

        let failed = RecordOutcome::task_failed(&record(), &ResolveError::TaskFailed("y".to_string()));

        let summary =
            BatchSummary::from_outcomes(Uuid::new_v4(), Utc::now(), 1.5, vec![completed, failed]);

        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.completed_records, 1);
        assert_eq!(summary.failed_records, 1);
        assert_eq!(summary.rows_emitted, 3);
        assert_eq!(summary.matches, 2);
        assert_eq!(summary.error_entries, 2);
        assert!((summary.success_rate() - 0.5).abs() < f64::EPSILON);
        assert!(summary.has_failures());
        assert_eq!(summary.to_dict().get("rows_emitted").unwrap(), 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::from_outcomes(Uuid::new_v4(), Utc::now(), 0.0, Vec::new());
        assert_eq!(summary.success_rate(), 0.0);
        assert!(!summary.has_failures());
    }
}

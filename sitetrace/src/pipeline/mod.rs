//! Resolution orchestration.
//!
//! This module provides:
//! - The [`Resolver`] driving records through search and extraction
//! - Per-record and per-batch outcome reporting

mod integration_tests;
mod outcome;
mod resolver;

pub use outcome::{BatchSummary, FailureRecord, RecordOutcome, RecordStatus};
pub use resolver::Resolver;

//! Core data model for website resolution.
//!
//! This module contains the types that flow through a run:
//! - Source type enum and its wire names
//! - Raw and validated input records
//! - Search results, resolution attempts and output rows
//! - Error-sink entries

mod records;
mod source;

pub use records::{
    ErrorEntry, InputRecord, OutputRow, RawInputRecord, ResolutionAttempt, SearchResult,
};
pub use source::SourceType;

//! In-memory output sink for tests and embedding.

use parking_lot::RwLock;

use super::OutputSink;
use crate::core::{ErrorEntry, OutputRow};
use crate::errors::ResolveError;

/// A collecting output sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingOutputSink {
    rows: RwLock<Vec<OutputRow>>,
    errors: RwLock<Vec<ErrorEntry>>,
    progress: RwLock<Vec<String>>,
}

impl CollectingOutputSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected rows.
    #[must_use]
    pub fn rows(&self) -> Vec<OutputRow> {
        self.rows.read().clone()
    }

    /// Returns all collected error entries.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorEntry> {
        self.errors.read().clone()
    }

    /// Returns all collected progress lines.
    #[must_use]
    pub fn progress(&self) -> Vec<String> {
        self.progress.read().clone()
    }

    /// Clears everything collected so far.
    pub fn clear(&self) {
        self.rows.write().clear();
        self.errors.write().clear();
        self.progress.write().clear();
    }
}

impl OutputSink for CollectingOutputSink {
    fn write_row(&self, row: &OutputRow) -> Result<(), ResolveError> {
        self.rows.write().push(row.clone());
        Ok(())
    }

    fn write_error(&self, entry: &ErrorEntry) -> Result<(), ResolveError> {
        self.errors.write().push(entry.clone());
        Ok(())
    }

    fn write_progress(&self, line: &str) -> Result<(), ResolveError> {
        self.progress.write().push(line.to_string());
        Ok(())
    }
}

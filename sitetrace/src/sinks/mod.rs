//! Output sinks for rows, error entries, and progress lines.

mod collecting;
mod file;

pub use collecting::CollectingOutputSink;
pub use file::FileOutputSink;

use crate::core::{ErrorEntry, OutputRow};
use crate::errors::ResolveError;

/// Trait for sinks receiving resolution output.
///
/// Called concurrently from record tasks. Each call must land as one
/// whole line; lines from different calls may interleave in any order.
pub trait OutputSink: Send + Sync {
    /// Appends a row to the per-source output stream.
    fn write_row(&self, row: &OutputRow) -> Result<(), ResolveError>;

    /// Appends an entry to the error stream.
    fn write_error(&self, entry: &ErrorEntry) -> Result<(), ResolveError>;

    /// Appends a line to the progress stream.
    fn write_progress(&self, line: &str) -> Result<(), ResolveError>;
}

//! Batch input files.

use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::RawInputRecord;
use crate::errors::ResolveError;

/// Returns `{dir}/input_{batch}.csv`.
#[must_use]
pub fn input_path(dir: &Path, batch: &str) -> PathBuf {
    dir.join(format!("input_{batch}.csv"))
}

/// Reads raw records from a headered CSV file.
///
/// Columns are matched by name (`domain`, `company_id`, `entity`,
/// `google_query`); others are ignored. Rows that fail to deserialize are
/// logged and skipped.
pub fn read_input_csv(path: &Path) -> Result<Vec<RawInputRecord>, ResolveError> {
    let file = File::open(path)?;
    let records = read_input(file)?;
    info!(path = %path.display(), records = records.len(), "Loaded input");
    Ok(records)
}

/// Reads raw records from any CSV source.
pub fn read_input<R: Read>(reader: R) -> Result<Vec<RawInputRecord>, ResolveError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    // Fail early on an unreadable header row.
    reader.headers()?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawInputRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => warn!(row = index + 1, "Skipping input row: {err}"),
        }
    }
    Ok(records)
}

//! Append-only text files under an output directory.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::OutputSink;
use crate::core::{ErrorEntry, OutputRow, SourceType};
use crate::errors::ResolveError;

const RESULT_DIR: &str = "result";
const ERROR_DIR: &str = "error";
const SUCCESS_DIR: &str = "success";

/// Writes `result/{source}_{batch}.txt`, `error/errors_{batch}.txt` and
/// `success/success_{batch}.txt` beneath a root directory.
///
/// Every file is truncated on creation, so rerunning a batch replaces its
/// previous output.
#[derive(Debug)]
pub struct FileOutputSink {
    root: PathBuf,
    batch: String,
    results: HashMap<SourceType, Mutex<File>>,
    errors: Mutex<File>,
    progress: Mutex<File>,
}

impl FileOutputSink {
    /// Creates the output directories and opens every stream.
    pub fn create(root: impl Into<PathBuf>, batch: impl Into<String>) -> Result<Self, ResolveError> {
        let root = root.into();
        let batch = batch.into();
        for dir in [RESULT_DIR, ERROR_DIR, SUCCESS_DIR] {
            fs::create_dir_all(root.join(dir))?;
        }

        let mut sink = Self {
            errors: Mutex::new(open_truncate(
                &root.join(ERROR_DIR).join(format!("errors_{batch}.txt")),
            )?),
            progress: Mutex::new(open_truncate(
                &root.join(SUCCESS_DIR).join(format!("success_{batch}.txt")),
            )?),
            root,
            batch,
            results: HashMap::new(),
        };
        for source in SourceType::ALL {
            let file = open_truncate(&sink.result_path(source))?;
            sink.results.insert(source, Mutex::new(file));
        }
        Ok(sink)
    }

    /// Path of the result file for a source.
    #[must_use]
    pub fn result_path(&self, source: SourceType) -> PathBuf {
        self.root
            .join(RESULT_DIR)
            .join(format!("{}_{}.txt", source.as_str(), self.batch))
    }

    /// Path of the error file.
    #[must_use]
    pub fn error_path(&self) -> PathBuf {
        self.root.join(ERROR_DIR).join(format!("errors_{}.txt", self.batch))
    }

    /// Path of the progress file.
    #[must_use]
    pub fn progress_path(&self) -> PathBuf {
        self.root
            .join(SUCCESS_DIR)
            .join(format!("success_{}.txt", self.batch))
    }
}

fn open_truncate(path: &Path) -> Result<File, ResolveError> {
    Ok(OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?)
}

fn write_line(file: &mut File, line: &str) -> Result<(), ResolveError> {
    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');
    file.write_all(buf.as_bytes())?;
    file.flush()?;
    Ok(())
}

impl OutputSink for FileOutputSink {
    fn write_row(&self, row: &OutputRow) -> Result<(), ResolveError> {
        let Some(file) = self.results.get(&row.source_type) else {
            return Err(ResolveError::Io(std::io::Error::other(format!(
                "no result stream for {}",
                row.source_type
            ))));
        };
        write_line(&mut file.lock(), &row.to_line())
    }

    fn write_error(&self, entry: &ErrorEntry) -> Result<(), ResolveError> {
        write_line(&mut self.errors.lock(), &entry.to_line())
    }

    fn write_progress(&self, line: &str) -> Result<(), ResolveError> {
        write_line(&mut self.progress.lock(), line)
    }
}

//! Locates and reads the raw accident table.

use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// The full source table, held in memory for the duration of a run.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl SourceTable {
    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.headers.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Returns the first `*.csv` file (by file name) directly inside `input_dir`.
pub fn find_source_file(input_dir: &Path) -> Result<PathBuf> {
    let missing = || PipelineError::MissingInputFile {
        dir: input_dir.to_path_buf(),
    };

    let entries = fs::read_dir(input_dir).map_err(|_| missing())?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("csv") {
            candidates.push(path);
        }
    }
    candidates.sort();

    debug!(count = candidates.len(), dir = %input_dir.display(), "CSV candidates found");
    candidates.into_iter().next().ok_or_else(missing)
}

/// Reads the whole CSV at `path` into memory.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<SourceTable> {
    info!("Loading traffic data");

    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let table = SourceTable { headers, records };
    let (rows, columns) = table.shape();
    info!(rows, columns, "Original data shape");
    debug!(columns = ?table.headers.iter().collect::<Vec<_>>(), "All column names");

    Ok(table)
}

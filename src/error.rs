//! Error kinds raised by the preparation pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no CSV file found in {dir}/ (place the accident CSV in that folder)")]
    MissingInputFile { dir: PathBuf },

    #[error("required columns missing from source table: {}", missing.join(", "))]
    MissingRequiredColumns { missing: Vec<String> },

    #[error("no complete rows left after dropping rows with missing values")]
    EmptySample,

    #[error("cannot sample {requested} rows: only {available} complete rows available")]
    InsufficientSampleSize { requested: usize, available: usize },

    #[error("{path} not found (run the `process` command first)")]
    MissingArtifact { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

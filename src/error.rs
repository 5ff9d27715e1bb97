use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Fatal errors surfaced to the caller. Dirty rows (invalid dates, null
/// sentinels, unparsable identifier fields) are filtered during ingestion
/// and never appear here.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("District map error: {0}")]
    DistrictMap(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

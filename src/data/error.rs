use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be turned into a [`Table`](super::model::Table).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid Parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("invalid Arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// The file parsed but is not tabular in the expected shape.
    #[error("malformed dataset: {0}")]
    Malformed(String),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
}

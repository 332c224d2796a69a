//! Error types for dataset loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset registry.
///
/// Every variant is fatal at startup: the registry is either fully loaded or
/// not at all.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Dataset file not found.
    #[error("dataset file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is neither `.parquet` nor `.csv`.
    #[error("unsupported dataset format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to parse Parquet with Polars.
    #[error("failed to parse Parquet {path}: {message}")]
    ParquetParse { path: PathBuf, message: String },

    /// A column header is blank.
    #[error("dataset {path} has an empty column name")]
    EmptyColumnName { path: PathBuf },

    // === Registry Errors ===
    /// Declared key or source column missing from a dataset.
    #[error("required column '{column}' not found in dataset {dataset}")]
    MissingColumn { dataset: String, column: String },

    /// A required dataset was not supplied.
    #[error("required dataset {dataset} is missing")]
    MissingDataset { dataset: String },

    // === Configuration Errors ===
    /// Failed to read the configuration file.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

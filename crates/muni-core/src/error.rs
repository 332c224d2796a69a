//! Error types for indicator computation.

use thiserror::Error;

use muni_model::MunicipalityKey;

/// Errors surfaced by the engine.
///
/// Field-level failures never appear here; they are carried as
/// [`muni_model::IndicatorValue::Unavailable`] inside the result.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The population table has no row for the selection.
    #[error("municipality not found: {key}")]
    MunicipalityNotFound { key: MunicipalityKey },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, CoreError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid municipality key: '{0}'")]
    InvalidMunicipalityKey(String),
    #[error("invalid age band: '{0}'")]
    InvalidAgeBand(String),
    #[error("unknown indicator code: '{0}'")]
    UnknownIndicator(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

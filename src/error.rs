use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unsupported payload: {0}. Expected an object, a string, or null")]
    UnsupportedPayload(String),

    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

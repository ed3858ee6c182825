use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("Report not found: {0}")]
    ReportNotFound(Uuid),

    #[error("Report is not available yet. Please try again.")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, VitalsError>;

use thiserror::Error;

/// Errors that can occur while writing the admin log
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Admin log write failed: {0}")]
    LogWriteFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

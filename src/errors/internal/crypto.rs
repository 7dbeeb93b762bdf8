use thiserror::Error;

/// Errors from password hashing and token signing
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    TokenSigning(String),
}

use thiserror::Error;

pub mod audit;
pub mod crypto;
pub mod database;
pub mod user;

pub use audit::AuditError;
pub use crypto::CryptoError;
pub use database::DatabaseError;
pub use user::UserError;

/// Internal error type for store and service operations.
///
/// Separates infrastructure errors (shared) from domain errors
/// (store-specific). Not exposed via API - endpoints must convert to the
/// per-API error enums.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn transaction(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Transaction {
            operation: operation.to_string(),
            source,
        })
    }
}

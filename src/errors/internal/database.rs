use thiserror::Error;

/// Infrastructure errors from the database layer
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error in {operation}: {source}")]
    Operation {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Transaction error in {operation}: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

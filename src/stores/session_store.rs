use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::errors::InternalError;
use crate::types::db::session::{self, Entity as Session};

/// SessionStore manages token-backed login records.
///
/// Only token hashes are stored. A request is considered logged in when
/// its token hash resolves to an unexpired row here, which is why deleting
/// a user's rows (on ban, or by cascade on deletion) logs them out
/// immediately even though their JWT is still signature-valid.
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    /// Create a new SessionStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a new session for a user
    pub async fn create(
        &self,
        user_id: &str,
        token_hash: String,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        let row = session::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            token_hash: Set(token_hash),
            user_id: Set(user_id.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now().timestamp()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_session", e))?;

        Ok(())
    }

    /// Find an unexpired session by token hash
    pub async fn find_valid(
        &self,
        token_hash: &str,
    ) -> Result<Option<session::Model>, InternalError> {
        let now = Utc::now().timestamp();

        let found = Session::find()
            .filter(session::Column::TokenHash.eq(token_hash))
            .filter(session::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_session", e))?;

        Ok(found)
    }

    /// Delete a session by token hash (logout)
    pub async fn delete_by_hash(&self, token_hash: &str) -> Result<(), InternalError> {
        Session::delete_many()
            .filter(session::Column::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_session", e))?;

        Ok(())
    }

    /// Count the live sessions of a user
    pub async fn count_for_user(&self, user_id: &str) -> Result<u64, InternalError> {
        use sea_orm::PaginatorTrait;

        Session::find()
            .filter(session::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_sessions", e))
    }
}

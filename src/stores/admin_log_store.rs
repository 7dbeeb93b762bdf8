use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::AuditError;
use crate::errors::InternalError;
use crate::types::db::admin_log;
use crate::types::internal::AdminLogEntry;

/// Repository for the append-only admin log.
///
/// Rows are only ever inserted. The moderation flows call `append_with`
/// so the log entry commits or rolls back together with the mutation it
/// records.
pub struct AdminLogStore {
    db: DatabaseConnection,
}

impl AdminLogStore {
    /// Create a new AdminLogStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append an entry using the given connection (plain or transaction)
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if serialization or the database insert fails
    pub async fn append_with<C: ConnectionTrait>(
        &self,
        conn: &C,
        entry: AdminLogEntry,
    ) -> Result<(), InternalError> {
        let details_json =
            serde_json::to_string(&entry.details).map_err(AuditError::Serialization)?;

        let row = admin_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            actor_id: Set(entry.actor_id),
            action: Set(entry.action.as_str().to_string()),
            target_id: Set(entry.target_id),
            details: Set(details_json),
            timestamp: Set(Utc::now().to_rfc3339()),
        };

        row.insert(conn)
            .await
            .map_err(|e| InternalError::database("append_admin_log", e))?;

        Ok(())
    }

    /// Append an entry outside any transaction
    pub async fn append(&self, entry: AdminLogEntry) -> Result<(), InternalError> {
        self.append_with(&self.db, entry).await
    }

    /// All entries recorded against a target, oldest first
    pub async fn entries_for_target(
        &self,
        target_id: &str,
    ) -> Result<Vec<admin_log::Model>, InternalError> {
        admin_log::Entity::find()
            .filter(admin_log::Column::TargetId.eq(target_id))
            .order_by_asc(admin_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("admin_log_entries_for_target", e))
    }
}

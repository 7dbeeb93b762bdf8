use std::sync::Arc;

use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::errors::internal::{CryptoError, UserError};
use crate::errors::InternalError;
use crate::stores::AdminLogStore;
use crate::types::db::user::{self, Entity as User, Role};
use crate::types::db::session;
use crate::types::internal::{AdminAction, AdminLogEntry, RequestContext};

/// Fields required to create a user record
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub password: String,
}

/// UserStore manages user identity records and the moderation lifecycle.
///
/// The moderation mutations (ban, unban, delete) run as apply-and-record
/// transactions: the user mutation and its admin log entry commit
/// atomically, so the audit trail always matches the data.
pub struct UserStore {
    db: DatabaseConnection,
    password_pepper: String,
    admin_logs: Arc<AdminLogStore>,
}

impl UserStore {
    /// Create a new UserStore
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - Secret key mixed into password hashes (from SecretManager)
    /// * `admin_logs` - Store used to record moderation actions
    pub fn new(
        db: DatabaseConnection,
        password_pepper: String,
        admin_logs: Arc<AdminLogStore>,
    ) -> Self {
        Self {
            db,
            password_pepper,
            admin_logs,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| {
            InternalError::Crypto(CryptoError::Hashing(format!(
                "Failed to initialize Argon2 with secret: {}",
                e
            )))
        })
    }

    /// Add a new user to the database
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    /// * `Err(InternalError)` - EmailTaken if the email is registered, or a database error
    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(&new_user.email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("create_user_lookup", e))?;

        if existing.is_some() {
            return Err(UserError::EmailTaken(new_user.email).into());
        }

        let salt = SaltString::generate(&mut rand_core::OsRng);
        let password_hash = self
            .argon2()?
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| {
                InternalError::Crypto(CryptoError::Hashing(format!(
                    "Password hashing error: {}",
                    e
                )))
            })?
            .to_string();

        let now = Utc::now().timestamp();
        let row = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            phone_number: Set(new_user.phone_number),
            role: Set(new_user.role),
            is_active: Set(true),
            banned: Set(false),
            ban_reason: Set(None),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_user", e))
    }

    /// Find a user by id, returning None when absent
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Get a user by id, failing with UserError::NotFound when absent
    pub async fn get_by_id(&self, user_id: &str) -> Result<user::Model, InternalError> {
        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()).into())
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    /// Verify a plaintext password against the stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match (or the stored hash is unparseable)
    pub async fn verify_password(
        &self,
        user: &user::Model,
        password: &str,
    ) -> Result<bool, InternalError> {
        let parsed_hash = match PasswordHash::new(&user.password_hash) {
            Ok(hash) => hash,
            Err(_) => return Ok(false),
        };

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// All users, newest first (admin console listing)
    pub async fn list_all(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Ban a user: mark banned and inactive, record the reason, delete all
    /// of the target's sessions (forced logout), and append one admin log
    /// entry. Runs in a single transaction.
    ///
    /// Preconditions (target exists, not already banned, hierarchy checks)
    /// are enforced by the moderation service before this is called.
    pub async fn ban_user(
        &self,
        ctx: &RequestContext,
        target: &user::Model,
        reason: &str,
    ) -> Result<user::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("ban_user", e))?;

        let mut active: user::ActiveModel = target.clone().into();
        active.banned = Set(true);
        active.is_active = Set(false);
        active.ban_reason = Set(Some(reason.to_string()));
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("ban_user_update", e))?;

        session::Entity::delete_many()
            .filter(session::Column::UserId.eq(&target.id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("ban_user_delete_sessions", e))?;

        let entry = AdminLogEntry::new(AdminAction::BanUser, ctx.actor_id.clone(), &target.id)
            .with_detail("banned_user_email", json!(target.email))
            .with_detail("banned_user_role", json!(target.role.as_str()))
            .with_detail("ban_reason", json!(reason));
        self.admin_logs.append_with(&txn, entry).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("ban_user_commit", e))?;

        Ok(updated)
    }

    /// Unban a user: clear the ban state, reactivate the account, and
    /// append one admin log entry. Runs in a single transaction.
    pub async fn unban_user(
        &self,
        ctx: &RequestContext,
        target: &user::Model,
    ) -> Result<user::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("unban_user", e))?;

        let previous_reason = target.ban_reason.clone();

        let mut active: user::ActiveModel = target.clone().into();
        active.banned = Set(false);
        active.is_active = Set(true);
        active.ban_reason = Set(None);
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("unban_user_update", e))?;

        let entry = AdminLogEntry::new(AdminAction::UnbanUser, ctx.actor_id.clone(), &target.id)
            .with_detail("unbanned_user_email", json!(target.email))
            .with_detail("unbanned_user_role", json!(target.role.as_str()))
            .with_detail("previous_ban_reason", json!(previous_reason));
        self.admin_logs.append_with(&txn, entry).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("unban_user_commit", e))?;

        Ok(updated)
    }

    /// Delete a user permanently.
    ///
    /// Appends an admin log entry snapshotting the account, then deletes
    /// the user row inside the same transaction. Dependent profiles,
    /// lessons, reviews and sessions are removed by ON DELETE CASCADE, not
    /// by application code.
    pub async fn delete_user(
        &self,
        ctx: &RequestContext,
        target: &user::Model,
        action: AdminAction,
    ) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("delete_user", e))?;

        let entry = AdminLogEntry::new(action, ctx.actor_id.clone(), &target.id)
            .with_detail("deleted_user_email", json!(target.email))
            .with_detail("deleted_user_role", json!(target.role.as_str()))
            .with_detail("deleted_user_name", json!(target.full_name()));
        self.admin_logs.append_with(&txn, entry).await?;

        User::delete_by_id(&target.id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("delete_user_commit", e))?;

        Ok(())
    }
}

use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::api::ModerationError;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::auth::Claims;
use crate::types::internal::{AdminAction, RequestContext};

/// Minimum length of a ban reason after trimming
const MIN_BAN_REASON_LENGTH: usize = 10;

/// Moderation service orchestrating the admin user lifecycle flows.
///
/// Each operation is a validate, authorize, mutate, audit-log sequence.
/// The mutation and its log entry are committed atomically by the store;
/// this layer owns validation and the role hierarchy.
pub struct ModerationService {
    user_store: Arc<UserStore>,
}

impl ModerationService {
    /// Create ModerationService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
        }
    }

    /// Extract claims and require an admin caller
    fn require_admin<'a>(
        &self,
        ctx: &'a RequestContext,
    ) -> Result<&'a Claims, ModerationError> {
        let claims = ctx
            .claims
            .as_ref()
            .ok_or_else(ModerationError::unauthenticated)?;

        if !claims.role.is_admin() {
            return Err(ModerationError::admin_required());
        }

        Ok(claims)
    }

    /// Ban a user from the platform.
    ///
    /// # Preconditions
    /// Caller is ADMIN or SUPER_ADMIN; the trimmed reason is at least 10
    /// characters; the target exists, is not the caller, is not already
    /// banned; admin targets require a SUPER_ADMIN caller.
    ///
    /// # Effects
    /// Sets banned=true, is_active=false, stores the reason, deletes all of
    /// the target's sessions, and appends one BAN_USER admin log entry, all
    /// in one transaction.
    pub async fn ban_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        ban_reason: &str,
    ) -> Result<user::Model, ModerationError> {
        let claims = self.require_admin(ctx)?;

        let reason = ban_reason.trim();
        if reason.chars().count() < MIN_BAN_REASON_LENGTH {
            return Err(ModerationError::validation_error(
                "Ban reason is required (minimum 10 characters)",
            ));
        }

        if claims.sub == user_id {
            return Err(ModerationError::self_action_denied());
        }

        let target = self
            .user_store
            .get_by_id(user_id)
            .await
            .map_err(ModerationError::from_internal)?;

        if !claims.role.can_moderate(target.role) {
            return Err(ModerationError::super_admin_required());
        }

        if target.banned {
            return Err(ModerationError::already_banned());
        }

        let banned = self
            .user_store
            .ban_user(ctx, &target, reason)
            .await
            .map_err(ModerationError::from_internal)?;

        tracing::info!(
            "User {} banned by {} (reason: {})",
            user_id,
            claims.sub,
            reason
        );

        Ok(banned)
    }

    /// Lift a ban.
    ///
    /// # Preconditions
    /// Caller is ADMIN or SUPER_ADMIN; the target exists and is banned.
    ///
    /// # Effects
    /// Clears banned/ban_reason, sets is_active=true, and appends one
    /// UNBAN_USER admin log entry, in one transaction.
    pub async fn unban_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<user::Model, ModerationError> {
        let claims = self.require_admin(ctx)?;

        let target = self
            .user_store
            .get_by_id(user_id)
            .await
            .map_err(ModerationError::from_internal)?;

        if !target.banned {
            return Err(ModerationError::not_banned());
        }

        let unbanned = self
            .user_store
            .unban_user(ctx, &target)
            .await
            .map_err(ModerationError::from_internal)?;

        tracing::info!("User {} unbanned by {}", user_id, claims.sub);

        Ok(unbanned)
    }

    /// Permanently delete a user.
    ///
    /// # Preconditions
    /// Caller is ADMIN or SUPER_ADMIN and not the target; admin targets
    /// require a SUPER_ADMIN caller.
    ///
    /// # Effects
    /// Appends a DELETE_USER admin log entry snapshotting the account, then
    /// deletes the user row in the same transaction. Profiles, lessons,
    /// reviews and sessions go with it by cascade. Irreversible.
    ///
    /// # Returns
    /// A snapshot of the deleted user for the response body.
    pub async fn delete_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<user::Model, ModerationError> {
        let claims = self.require_admin(ctx)?;

        if claims.sub == user_id {
            return Err(ModerationError::self_action_denied());
        }

        let target = self
            .user_store
            .get_by_id(user_id)
            .await
            .map_err(ModerationError::from_internal)?;

        if !claims.role.can_moderate(target.role) {
            return Err(ModerationError::super_admin_required());
        }

        self.user_store
            .delete_user(ctx, &target, AdminAction::DeleteUser)
            .await
            .map_err(ModerationError::from_internal)?;

        tracing::info!("User {} deleted by {}", user_id, claims.sub);

        Ok(target)
    }

    /// All users for the admin console listing
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<user::Model>, ModerationError> {
        self.require_admin(ctx)?;

        self.user_store
            .list_all()
            .await
            .map_err(ModerationError::from_internal)
    }
}

#[cfg(test)]
#[path = "moderation_service_tests.rs"]
mod moderation_service_tests;

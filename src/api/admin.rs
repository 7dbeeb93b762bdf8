use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::auth::TokenCookie;
use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::api::ModerationError;
use crate::services::ModerationService;
use crate::types::dto::admin::{
    AdminUserSummary, BanUserRequest, BanUserResponse, BannedUserSummary, DeleteUserRequest,
    DeleteUserResponse, DeletedUserSummary, ListUsersResponse, UnbanUserRequest,
    UnbanUserResponse, UnbannedUserSummary,
};

/// Admin moderation API endpoints
pub struct AdminApi {
    app_data: Arc<AppData>,
    moderation: ModerationService,
}

impl AdminApi {
    /// Create a new AdminApi backed by the shared AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        let moderation = ModerationService::new(app_data.clone());
        Self {
            app_data,
            moderation,
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// User moderation
    Moderation,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Ban a user from the platform
    #[oai(path = "/ban-user", method = "post", tag = "AdminTags::Moderation")]
    async fn ban_user(
        &self,
        req: &Request,
        auth: TokenCookie,
        body: Json<BanUserRequest>,
    ) -> Result<Json<BanUserResponse>, ModerationError> {
        let ctx = helpers::request_context(&self.app_data, req, Some(&auth.0.key)).await;

        let banned = self
            .moderation
            .ban_user(&ctx, &body.user_id, &body.ban_reason)
            .await?;

        Ok(Json(BanUserResponse {
            success: true,
            message: "User banned successfully".to_string(),
            banned_user: BannedUserSummary {
                id: banned.id.clone(),
                email: banned.email.clone(),
                name: banned.full_name(),
                ban_reason: banned.ban_reason.clone().unwrap_or_default(),
            },
        }))
    }

    /// Lift a user's ban
    #[oai(path = "/unban-user", method = "post", tag = "AdminTags::Moderation")]
    async fn unban_user(
        &self,
        req: &Request,
        auth: TokenCookie,
        body: Json<UnbanUserRequest>,
    ) -> Result<Json<UnbanUserResponse>, ModerationError> {
        let ctx = helpers::request_context(&self.app_data, req, Some(&auth.0.key)).await;

        let unbanned = self.moderation.unban_user(&ctx, &body.user_id).await?;

        Ok(Json(UnbanUserResponse {
            success: true,
            message: "User unbanned successfully".to_string(),
            unbanned_user: UnbannedUserSummary {
                id: unbanned.id.clone(),
                email: unbanned.email.clone(),
                name: unbanned.full_name(),
            },
        }))
    }

    /// Permanently delete a user and all their data
    #[oai(path = "/delete-user", method = "delete", tag = "AdminTags::Moderation")]
    async fn delete_user(
        &self,
        req: &Request,
        auth: TokenCookie,
        body: Json<DeleteUserRequest>,
    ) -> Result<Json<DeleteUserResponse>, ModerationError> {
        let ctx = helpers::request_context(&self.app_data, req, Some(&auth.0.key)).await;

        let deleted = self.moderation.delete_user(&ctx, &body.user_id).await?;

        Ok(Json(DeleteUserResponse {
            success: true,
            message: "User deleted successfully".to_string(),
            deleted_user: DeletedUserSummary {
                id: deleted.id.clone(),
                email: deleted.email.clone(),
                name: deleted.full_name(),
                role: deleted.role.as_str().to_string(),
            },
        }))
    }

    /// List all users for the moderation console
    #[oai(path = "/users", method = "get", tag = "AdminTags::Moderation")]
    async fn list_users(
        &self,
        req: &Request,
        auth: TokenCookie,
    ) -> Result<Json<ListUsersResponse>, ModerationError> {
        let ctx = helpers::request_context(&self.app_data, req, Some(&auth.0.key)).await;

        let users = self.moderation.list_users(&ctx).await?;

        Ok(Json(ListUsersResponse {
            users: users
                .into_iter()
                .map(|user| AdminUserSummary {
                    name: user.full_name(),
                    id: user.id,
                    email: user.email,
                    role: user.role.as_str().to_string(),
                    is_active: user.is_active,
                    banned: user.banned,
                    ban_reason: user.ban_reason,
                })
                .collect(),
        }))
    }
}

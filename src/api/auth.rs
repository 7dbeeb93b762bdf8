use std::sync::Arc;

use poem::Request;
use poem_openapi::{auth::ApiKey, payload::Json, ApiResponse, OpenApi, SecurityScheme, Tags};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::api::AuthError;
use crate::types::dto::auth::{LoginBody, LoginRequest, LogoutBody, UserSummary, WhoAmIResponse};

/// Signed session token carried in the `token` cookie
#[derive(SecurityScheme)]
#[oai(ty = "api_key", key_name = "token", key_in = "cookie")]
pub struct TokenCookie(pub ApiKey);

/// Authentication API endpoints
pub struct AuthApi {
    app_data: Arc<AppData>,
}

impl AuthApi {
    /// Create a new AuthApi backed by the shared AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Successful login, with the session cookie attached
#[derive(ApiResponse)]
pub enum LoginResponse {
    #[oai(status = 200)]
    Ok(Json<LoginBody>, #[oai(header = "Set-Cookie")] String),
}

/// Successful logout, with the session cookie cleared
#[derive(ApiResponse)]
pub enum LogoutResponse {
    #[oai(status = 200)]
    Ok(Json<LogoutBody>, #[oai(header = "Set-Cookie")] String),
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password to receive a session cookie
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<LoginResponse, AuthError> {
        let user = self
            .app_data
            .user_store
            .find_by_email(&body.email)
            .await
            .map_err(AuthError::from_internal)?
            .ok_or_else(AuthError::invalid_credentials)?;

        let password_valid = self
            .app_data
            .user_store
            .verify_password(&user, &body.password)
            .await
            .map_err(AuthError::from_internal)?;

        if !password_valid {
            return Err(AuthError::invalid_credentials());
        }

        if user.banned {
            let reason = user.ban_reason.as_deref().unwrap_or("no reason recorded");
            return Err(AuthError::account_banned(reason));
        }

        let token = self
            .app_data
            .token_service
            .generate_jwt(&user)
            .map_err(AuthError::from_internal)?;

        let token_hash = self.app_data.token_service.hash_session_token(&token);
        let expires_at = self.app_data.token_service.session_expiration();
        self.app_data
            .session_store
            .create(&user.id, token_hash, expires_at)
            .await
            .map_err(AuthError::from_internal)?;

        let cookie = helpers::session_cookie(&token, 24 * 60 * 60);

        Ok(LoginResponse::Ok(
            Json(LoginBody {
                success: true,
                message: "Logged in successfully".to_string(),
                user: UserSummary {
                    id: user.id,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    email: user.email,
                    role: user.role.as_str().to_string(),
                },
            }),
            cookie,
        ))
    }

    /// Logout and invalidate the current session
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: TokenCookie) -> Result<LogoutResponse, AuthError> {
        let token_hash = self.app_data.token_service.hash_session_token(&auth.0.key);
        self.app_data
            .session_store
            .delete_by_hash(&token_hash)
            .await
            .map_err(AuthError::from_internal)?;

        Ok(LogoutResponse::Ok(
            Json(LogoutBody {
                success: true,
                message: "Logged out successfully".to_string(),
            }),
            helpers::CLEAR_SESSION_COOKIE.to_string(),
        ))
    }

    /// Verify the session cookie and return the caller's identity
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(
        &self,
        req: &Request,
        auth: TokenCookie,
    ) -> Result<Json<WhoAmIResponse>, AuthError> {
        let ctx = helpers::request_context(&self.app_data, req, Some(&auth.0.key)).await;
        let claims = ctx.claims.ok_or_else(AuthError::unauthenticated)?;

        Ok(Json(WhoAmIResponse {
            user_id: claims.sub,
            role: claims.role.as_str().to_string(),
            expires_at: claims.exp,
        }))
    }
}

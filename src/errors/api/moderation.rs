use std::fmt;

use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::api::ErrorBody;
use crate::errors::internal::{InternalError, UserError};

/// Moderation endpoint error types
#[derive(ApiResponse, Debug)]
pub enum ModerationError {
    /// Missing or invalid session token
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorBody>),

    /// Caller role is not ADMIN or SUPER_ADMIN
    #[oai(status = 403)]
    AdminRequired(Json<ErrorBody>),

    /// Target outranks the caller in the moderation hierarchy
    #[oai(status = 403)]
    SuperAdminRequired(Json<ErrorBody>),

    /// Caller targeted their own account
    #[oai(status = 403)]
    SelfActionDenied(Json<ErrorBody>),

    /// Malformed input, e.g. a ban reason shorter than 10 characters
    #[oai(status = 400)]
    ValidationError(Json<ErrorBody>),

    /// Target user does not exist
    #[oai(status = 404)]
    UserNotFound(Json<ErrorBody>),

    /// Target is already banned
    #[oai(status = 409)]
    AlreadyBanned(Json<ErrorBody>),

    /// Target is not currently banned
    #[oai(status = 409)]
    NotBanned(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl ModerationError {
    /// Create an Unauthenticated error
    pub fn unauthenticated() -> Self {
        ModerationError::Unauthenticated(Json(ErrorBody {
            error: "unauthenticated".to_string(),
            message: "Missing or invalid session token".to_string(),
            status_code: 401,
        }))
    }

    /// Create an AdminRequired error
    pub fn admin_required() -> Self {
        ModerationError::AdminRequired(Json(ErrorBody {
            error: "admin_required".to_string(),
            message: "Admin access required".to_string(),
            status_code: 403,
        }))
    }

    /// Create a SuperAdminRequired error
    pub fn super_admin_required() -> Self {
        ModerationError::SuperAdminRequired(Json(ErrorBody {
            error: "super_admin_required".to_string(),
            message: "Only SUPER_ADMIN can moderate admin accounts".to_string(),
            status_code: 403,
        }))
    }

    /// Create a SelfActionDenied error
    pub fn self_action_denied() -> Self {
        ModerationError::SelfActionDenied(Json(ErrorBody {
            error: "self_action_denied".to_string(),
            message: "Cannot perform moderation actions on your own account".to_string(),
            status_code: 403,
        }))
    }

    /// Create a ValidationError with the given reason
    pub fn validation_error(message: impl Into<String>) -> Self {
        ModerationError::ValidationError(Json(ErrorBody {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create a UserNotFound error
    pub fn user_not_found(user_id: &str) -> Self {
        ModerationError::UserNotFound(Json(ErrorBody {
            error: "user_not_found".to_string(),
            message: format!("User not found: {}", user_id),
            status_code: 404,
        }))
    }

    /// Create an AlreadyBanned error
    pub fn already_banned() -> Self {
        ModerationError::AlreadyBanned(Json(ErrorBody {
            error: "already_banned".to_string(),
            message: "User is already banned".to_string(),
            status_code: 409,
        }))
    }

    /// Create a NotBanned error
    pub fn not_banned() -> Self {
        ModerationError::NotBanned(Json(ErrorBody {
            error: "not_banned".to_string(),
            message: "User is not banned".to_string(),
            status_code: 409,
        }))
    }

    /// Convert InternalError to ModerationError.
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Infrastructure details are logged but not exposed to clients.
    pub fn from_internal(err: InternalError) -> Self {
        match &err {
            InternalError::User(UserError::NotFound(user_id)) => {
                Self::user_not_found(user_id)
            }
            _ => {
                tracing::error!("Unexpected error in moderation operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        ModerationError::InternalError(Json(ErrorBody {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ModerationError::Unauthenticated(json) => json.0.message.clone(),
            ModerationError::AdminRequired(json) => json.0.message.clone(),
            ModerationError::SuperAdminRequired(json) => json.0.message.clone(),
            ModerationError::SelfActionDenied(json) => json.0.message.clone(),
            ModerationError::ValidationError(json) => json.0.message.clone(),
            ModerationError::UserNotFound(json) => json.0.message.clone(),
            ModerationError::AlreadyBanned(json) => json.0.message.clone(),
            ModerationError::NotBanned(json) => json.0.message.clone(),
            ModerationError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ModerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

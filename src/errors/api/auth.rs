use std::fmt;

use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::api::ErrorBody;
use crate::errors::internal::InternalError;

/// Authentication endpoint error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorBody>),

    /// Missing or invalid session token
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorBody>),

    /// Account is banned
    #[oai(status = 403)]
    AccountBanned(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorBody {
            error: "invalid_credentials".to_string(),
            message: "Invalid email or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create an Unauthenticated error
    pub fn unauthenticated() -> Self {
        AuthError::Unauthenticated(Json(ErrorBody {
            error: "unauthenticated".to_string(),
            message: "Missing or invalid session token".to_string(),
            status_code: 401,
        }))
    }

    /// Create an AccountBanned error carrying the recorded reason
    pub fn account_banned(reason: &str) -> Self {
        AuthError::AccountBanned(Json(ErrorBody {
            error: "account_banned".to_string(),
            message: format!("This account has been banned: {}", reason),
            status_code: 403,
        }))
    }

    /// Convert InternalError to AuthError
    pub fn from_internal(err: InternalError) -> Self {
        tracing::error!("Unexpected error in auth operation: {}", err);
        AuthError::InternalError(Json(ErrorBody {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::Unauthenticated(json) => json.0.message.clone(),
            AuthError::AccountBanned(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

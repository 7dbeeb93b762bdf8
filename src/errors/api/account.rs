use std::fmt;

use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::errors::internal::{InternalError, UserError};
use crate::types::dto::account::UpcomingLessonSummary;

/// Error response for account endpoints.
///
/// Carries the list of blocking lessons when a teacher tries to delete an
/// account that still has future commitments.
#[derive(Object, Debug)]
pub struct AccountErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,

    /// Future lessons preventing the deletion, when applicable
    pub upcoming_lessons: Option<Vec<UpcomingLessonSummary>>,
}

impl AccountErrorBody {
    fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
            upcoming_lessons: None,
        }
    }
}

/// Account self-service error types
#[derive(ApiResponse, Debug)]
pub enum AccountError {
    /// Missing or invalid session token, or wrong password
    #[oai(status = 401)]
    Unauthorized(Json<AccountErrorBody>),

    /// Wrong confirmation phrase
    #[oai(status = 400)]
    ValidationError(Json<AccountErrorBody>),

    /// Account no longer exists
    #[oai(status = 404)]
    UserNotFound(Json<AccountErrorBody>),

    /// Deletion blocked by upcoming lessons
    #[oai(status = 409)]
    UpcomingLessons(Json<AccountErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AccountErrorBody>),
}

impl AccountError {
    /// Create an Unauthorized error for a missing or invalid token
    pub fn unauthenticated() -> Self {
        AccountError::Unauthorized(Json(AccountErrorBody::new(
            "unauthenticated",
            "Missing or invalid session token",
            401,
        )))
    }

    /// Create an Unauthorized error for a failed password check
    pub fn incorrect_password() -> Self {
        AccountError::Unauthorized(Json(AccountErrorBody::new(
            "incorrect_password",
            "Incorrect password",
            401,
        )))
    }

    /// Create a ValidationError for a wrong confirmation phrase
    pub fn confirmation_mismatch() -> Self {
        AccountError::ValidationError(Json(AccountErrorBody::new(
            "confirmation_mismatch",
            "Please type 'DELETE MY ACCOUNT' to confirm",
            400,
        )))
    }

    /// Create a UserNotFound error
    pub fn user_not_found() -> Self {
        AccountError::UserNotFound(Json(AccountErrorBody::new(
            "user_not_found",
            "User not found",
            404,
        )))
    }

    /// Create an UpcomingLessons conflict listing the blocking lessons
    pub fn upcoming_lessons(lessons: Vec<UpcomingLessonSummary>) -> Self {
        let mut body = AccountErrorBody::new(
            "upcoming_lessons",
            format!(
                "Cannot delete account with {} upcoming lessons. Please complete or cancel them first.",
                lessons.len()
            ),
            409,
        );
        body.upcoming_lessons = Some(lessons);
        AccountError::UpcomingLessons(Json(body))
    }

    /// Convert InternalError to AccountError
    pub fn from_internal(err: InternalError) -> Self {
        match &err {
            InternalError::User(UserError::NotFound(_)) => Self::user_not_found(),
            _ => {
                tracing::error!("Unexpected error in account operation: {}", err);
                AccountError::InternalError(Json(AccountErrorBody::new(
                    "internal_error",
                    "An internal error occurred",
                    500,
                )))
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AccountError::Unauthorized(json) => json.0.message.clone(),
            AccountError::ValidationError(json) => json.0.message.clone(),
            AccountError::UserNotFound(json) => json.0.message.clone(),
            AccountError::UpcomingLessons(json) => json.0.message.clone(),
            AccountError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

use std::fmt;

use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::api::ErrorBody;
use crate::errors::internal::{InternalError, UserError};

/// Lesson booking error types
#[derive(ApiResponse, Debug)]
pub enum LessonError {
    /// Missing or invalid session token
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorBody>),

    /// Malformed booking input
    #[oai(status = 400)]
    ValidationError(Json<ErrorBody>),

    /// Teacher does not exist
    #[oai(status = 404)]
    TeacherNotFound(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl LessonError {
    pub fn unauthenticated() -> Self {
        LessonError::Unauthenticated(Json(ErrorBody {
            error: "unauthenticated".to_string(),
            message: "Missing or invalid session token".to_string(),
            status_code: 401,
        }))
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        LessonError::ValidationError(Json(ErrorBody {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn teacher_not_found(teacher_id: &str) -> Self {
        LessonError::TeacherNotFound(Json(ErrorBody {
            error: "teacher_not_found".to_string(),
            message: format!("Teacher not found: {}", teacher_id),
            status_code: 404,
        }))
    }

    pub fn from_internal(err: InternalError) -> Self {
        match &err {
            InternalError::User(UserError::NotFound(user_id)) => {
                Self::teacher_not_found(user_id)
            }
            _ => {
                tracing::error!("Unexpected error in lesson operation: {}", err);
                LessonError::InternalError(Json(ErrorBody {
                    error: "internal_error".to_string(),
                    message: "An internal error occurred".to_string(),
                    status_code: 500,
                }))
            }
        }
    }
}

impl fmt::Display for LessonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            LessonError::Unauthenticated(json) => &json.0.message,
            LessonError::ValidationError(json) => &json.0.message,
            LessonError::TeacherNotFound(json) => &json.0.message,
            LessonError::InternalError(json) => &json.0.message,
        };
        write!(f, "{}", message)
    }
}

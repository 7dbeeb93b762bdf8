use poem_openapi::Object;

pub mod account;
pub mod auth;
pub mod lessons;
pub mod moderation;

pub use account::AccountError;
pub use auth::AuthError;
pub use lessons::LessonError;
pub use moderation::ModerationError;

/// Standardized error response body shared by the API error enums
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

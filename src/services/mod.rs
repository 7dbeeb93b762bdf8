// Services layer - Business logic and orchestration
pub mod account_service;
pub mod crypto;
pub mod moderation_service;
pub mod notification_service;
pub mod reminder;
pub mod token_service;

pub use account_service::{AccountService, DELETE_CONFIRMATION_PHRASE};
pub use moderation_service::ModerationService;
pub use notification_service::{LessonEmail, MailerError, NotificationService};
pub use token_service::{TokenRejection, TokenService};

// Configuration layer - startup-time environment loading
pub mod logging;
pub mod mailer;
pub mod secret_manager;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use mailer::MailerConfig;
pub use secret_manager::{SecretError, SecretManager};

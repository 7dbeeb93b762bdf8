use std::env;

/// Configuration for the transactional email provider.
///
/// Constructed once at startup and handed to the notification service;
/// nothing else reads the provider environment directly. A missing API key
/// is not an error: the dispatcher degrades to a logged no-op so local
/// and test environments run without a SendGrid account.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub api_key: Option<String>,
    pub sender: String,
}

const DEFAULT_SENDER: &str = "no-reply@tutorhub.example";

impl MailerConfig {
    /// Load mailer configuration from environment variables
    pub fn from_env() -> Self {
        let api_key = env::var("SENDGRID_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            tracing::warn!("SENDGRID_API_KEY not configured - emails will not be sent");
        }

        let sender =
            env::var("SENDGRID_SENDER").unwrap_or_else(|_| DEFAULT_SENDER.to_string());

        Self { api_key, sender }
    }

    /// Config with no credential, for tests and offline development
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            sender: DEFAULT_SENDER.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{MailerConfig, SecretManager};
use crate::services::{NotificationService, TokenService};
use crate::stores::{AdminLogStore, LessonStore, SessionStore, UserStore};

/// Centralized application data following the main-owned stores pattern.
///
/// All stores and long-lived services are created once in main.rs and
/// shared across API handlers through this struct. Per-request services
/// (moderation, account) extract what they need from here.
pub struct AppData {
    pub db: DatabaseConnection,
    pub secret_manager: Arc<SecretManager>,
    pub admin_log_store: Arc<AdminLogStore>,
    pub user_store: Arc<UserStore>,
    pub session_store: Arc<SessionStore>,
    pub lesson_store: Arc<LessonStore>,
    pub token_service: Arc<TokenService>,
    pub notification_service: Arc<NotificationService>,
}

impl AppData {
    /// Initialize all application data.
    ///
    /// The database must be connected and migrated before calling this.
    /// The admin log store is created first since the user store records
    /// moderation actions through it.
    pub fn init(
        db: DatabaseConnection,
        secret_manager: Arc<SecretManager>,
        mailer_config: MailerConfig,
    ) -> Self {
        tracing::debug!("Creating stores...");
        let admin_log_store = Arc::new(AdminLogStore::new(db.clone()));

        let user_store = Arc::new(UserStore::new(
            db.clone(),
            secret_manager.password_pepper().to_string(),
            admin_log_store.clone(),
        ));

        let session_store = Arc::new(SessionStore::new(db.clone()));
        let lesson_store = Arc::new(LessonStore::new(db.clone()));

        let token_service = Arc::new(TokenService::new(
            secret_manager.jwt_secret().to_string(),
            secret_manager.session_token_secret().to_string(),
        ));

        let notification_service = Arc::new(NotificationService::new(mailer_config));

        tracing::debug!("Stores created");

        Self {
            db,
            secret_manager,
            admin_log_store,
            user_store,
            session_store,
            lesson_store,
            token_service,
            notification_service,
        }
    }
}

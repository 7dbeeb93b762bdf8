// Shared setup for integration tests

use std::sync::{Arc, Mutex};

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use uuid::Uuid;

use tutorhub_backend::app_data::AppData;
use tutorhub_backend::config::{MailerConfig, SecretManager};
use tutorhub_backend::stores::NewUser;
use tutorhub_backend::types::db::{user, Role};
use tutorhub_backend::types::internal::auth::Claims;
use tutorhub_backend::types::internal::RequestContext;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const TEST_PASSWORD: &str = "testpass-123";

/// Migrated in-memory database wrapped in AppData, mailer disabled
pub async fn setup_app_data() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let secret_manager = {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("JWT_SECRET", "test-secret-key-minimum-32-characters-long");
        std::env::set_var("PASSWORD_PEPPER", "test-pepper-minimum-32-characters-long");
        std::env::set_var("SESSION_TOKEN_SECRET", "test-session-secret-minimum-32-chars");
        Arc::new(SecretManager::init().expect("Failed to initialize test SecretManager"))
    };

    Arc::new(AppData::init(db, secret_manager, MailerConfig::disabled()))
}

/// Create a user with the given role and a unique email
pub async fn create_user(app_data: &Arc<AppData>, role: Role) -> user::Model {
    let suffix = Uuid::new_v4().simple().to_string();
    app_data
        .user_store
        .create_user(NewUser {
            first_name: "Test".to_string(),
            last_name: format!("User-{}", &suffix[..8]),
            email: format!("user-{}@example.com", suffix),
            phone_number: "+995500000000".to_string(),
            role,
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .expect("Failed to create test user")
}

/// Build an authenticated RequestContext for a user
pub fn context_for(user: &user::Model) -> RequestContext {
    let claims = Claims {
        sub: user.id.clone(),
        role: user.role,
        exp: 9_999_999_999,
        iat: 0,
        jti: Uuid::new_v4().to_string(),
    };

    RequestContext::new().with_auth(claims)
}

/// Issue a token and session row for a user, as login would
pub async fn open_session(app_data: &Arc<AppData>, user: &user::Model) -> String {
    let token = app_data
        .token_service
        .generate_jwt(user)
        .expect("Failed to generate token");

    let token_hash = app_data.token_service.hash_session_token(&token);
    let expires_at = app_data.token_service.session_expiration();

    app_data
        .session_store
        .create(&user.id, token_hash, expires_at)
        .await
        .expect("Failed to create session");

    token
}

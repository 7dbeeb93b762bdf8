// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::{Arc, Mutex};

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use uuid::Uuid;

use crate::app_data::AppData;
use crate::config::{MailerConfig, SecretManager};
use crate::stores::NewUser;
use crate::types::db::{user, Role};
use crate::types::internal::auth::Claims;
use crate::types::internal::RequestContext;

/// Global mutex for tests that touch environment variables.
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

/// Create a migrated in-memory database wrapped in AppData.
///
/// The mailer is disabled so no test ever reaches the network.
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let secret_manager = {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("JWT_SECRET", "test-secret-key-minimum-32-characters-long");
        std::env::set_var("PASSWORD_PEPPER", "test-pepper-minimum-32-characters-long");
        std::env::set_var("SESSION_TOKEN_SECRET", "test-session-secret-minimum-32-chars");
        Arc::new(SecretManager::init().expect("Failed to initialize test SecretManager"))
    };

    Arc::new(AppData::init(db, secret_manager, MailerConfig::disabled()))
}

/// Password used for every test user
pub const TEST_PASSWORD: &str = "testpass-123";

/// Create a user with the given role and a unique email
pub async fn create_test_user(app_data: &Arc<AppData>, role: Role) -> user::Model {
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

    RequestContext::new()
        .with_ip_address("127.0.0.1".parse().unwrap())
        .with_auth(claims)
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

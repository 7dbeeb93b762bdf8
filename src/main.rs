use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use tutorhub_backend::api::{AccountApi, AdminApi, AuthApi, HealthApi, LessonsApi};
use tutorhub_backend::app_data::AppData;
use tutorhub_backend::config::{init_logging, MailerConfig, SecretManager};
use tutorhub_backend::services::reminder;
use tutorhub_backend::stores::NewUser;
use tutorhub_backend::types::db::Role;

/// Create the initial SUPER_ADMIN account from environment variables.
///
/// Skipped with a warning when the variables are unset or the email is
/// already registered, so restarts are idempotent.
async fn bootstrap_super_admin(app_data: &AppData) {
    let (email, password) = match (
        std::env::var("SUPER_ADMIN_EMAIL"),
        std::env::var("SUPER_ADMIN_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email, password),
        _ => {
            tracing::warn!("SUPER_ADMIN_EMAIL/SUPER_ADMIN_PASSWORD not set - skipping bootstrap");
            return;
        }
    };

    match app_data.user_store.find_by_email(&email).await {
        Ok(Some(_)) => {
            tracing::info!("Super admin already exists, skipping creation");
        }
        Ok(None) => {
            let result = app_data
                .user_store
                .create_user(NewUser {
                    first_name: "Platform".to_string(),
                    last_name: "Admin".to_string(),
                    email,
                    phone_number: String::new(),
                    role: Role::SuperAdmin,
                    password,
                })
                .await;
            match result {
                Ok(user) => tracing::info!("Super admin created with ID: {}", user.id),
                Err(e) => tracing::error!("Failed to create super admin: {}", e),
            }
        }
        Err(e) => tracing::error!("Super admin lookup failed: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://tutorhub.db?mode=rwc".to_string());

    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database: {}", database_url);

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database migrations completed");

    let secret_manager =
        Arc::new(SecretManager::init().expect("Failed to initialize secret manager"));
    let mailer_config = MailerConfig::from_env();

    let app_data = Arc::new(AppData::init(db, secret_manager, mailer_config));

    bootstrap_super_admin(&app_data).await;

    // Pre-lesson reminder emails go out from this background task
    reminder::spawn_reminder_sweep(app_data.clone());

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            AdminApi::new(app_data.clone()),
            AccountApi::new(app_data.clone()),
            LessonsApi::new(app_data.clone()),
        ),
        "TutorHub API",
        "1.0.0",
    )
    .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://0.0.0.0:3000");

    Server::new(TcpListener::bind("0.0.0.0:3000")).run(app).await
}

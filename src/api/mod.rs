// API layer - HTTP endpoints
pub mod account;
pub mod admin;
pub mod auth;
pub mod health;
pub mod helpers;
pub mod lessons;

pub use account::AccountApi;
pub use admin::AdminApi;
pub use auth::AuthApi;
pub use health::HealthApi;
pub use lessons::LessonsApi;

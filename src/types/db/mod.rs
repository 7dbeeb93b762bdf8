// Database entities - SeaORM models
pub mod admin_log;
pub mod lesson;
pub mod review;
pub mod session;
pub mod student_profile;
pub mod teacher_profile;
pub mod user;

pub use user::Role;

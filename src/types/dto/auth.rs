use poem_openapi::Object;

/// Login request with email and password
#[derive(Object, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity summary returned on login
#[derive(Object, Debug)]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

/// Response body for a successful login
#[derive(Object, Debug)]
pub struct LoginBody {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
}

/// Response body for logout
#[derive(Object, Debug)]
pub struct LogoutBody {
    pub success: bool,
    pub message: String,
}

/// Response model for the whoami endpoint
#[derive(Object, Debug)]
pub struct WhoAmIResponse {
    pub user_id: String,
    pub role: String,

    /// Expiration of the current token (Unix timestamp)
    pub expires_at: i64,
}

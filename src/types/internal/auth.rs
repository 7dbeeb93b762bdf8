use serde::{Deserialize, Serialize};

use crate::types::db::Role;

/// JWT Claims structure carried in the `token` cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Role of the authenticated user
    pub role: Role,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Token identifier
    pub jti: String,
}

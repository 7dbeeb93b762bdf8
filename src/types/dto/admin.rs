use poem_openapi::Object;

/// Request to ban a user from the platform
#[derive(Object, Debug)]
pub struct BanUserRequest {
    /// The user ID to ban
    pub user_id: String,

    /// Reason for the ban (minimum 10 characters after trimming)
    pub ban_reason: String,
}

/// Identity summary of a freshly banned user
#[derive(Object, Debug)]
pub struct BannedUserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    pub ban_reason: String,
}

/// Response after banning a user
#[derive(Object, Debug)]
pub struct BanUserResponse {
    /// Whether the operation was successful
    pub success: bool,

    /// Human-readable message describing the result
    pub message: String,

    pub banned_user: BannedUserSummary,
}

/// Request to unban a user
#[derive(Object, Debug)]
pub struct UnbanUserRequest {
    /// The user ID to unban
    pub user_id: String,
}

/// Identity summary of a freshly unbanned user
#[derive(Object, Debug)]
pub struct UnbannedUserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Response after unbanning a user
#[derive(Object, Debug)]
pub struct UnbanUserResponse {
    pub success: bool,
    pub message: String,
    pub unbanned_user: UnbannedUserSummary,
}

/// Request to permanently delete a user
#[derive(Object, Debug)]
pub struct DeleteUserRequest {
    /// The user ID to delete
    pub user_id: String,
}

/// Snapshot of the user that was deleted
#[derive(Object, Debug)]
pub struct DeletedUserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Response after deleting a user
#[derive(Object, Debug)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
    pub deleted_user: DeletedUserSummary,
}

/// One row in the admin user listing
#[derive(Object, Debug)]
pub struct AdminUserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub banned: bool,
    pub ban_reason: Option<String>,
}

/// Response for the admin user listing
#[derive(Object, Debug)]
pub struct ListUsersResponse {
    pub users: Vec<AdminUserSummary>,
}

use std::collections::HashMap;
use std::fmt;

/// Privileged actions recorded in the admin log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    BanUser,
    UnbanUser,
    DeleteUser,
    DeleteAccount,
}

impl AdminAction {
    /// Convert to the string representation used for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BanUser => "BAN_USER",
            Self::UnbanUser => "UNBAN_USER",
            Self::DeleteUser => "DELETE_USER",
            Self::DeleteAccount => "DELETE_ACCOUNT",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One admin log entry, built by the service layer and written by
/// the store inside the same transaction as the mutation it records
#[derive(Debug, Clone)]
pub struct AdminLogEntry {
    pub actor_id: String,
    pub action: AdminAction,
    pub target_id: String,
    pub details: HashMap<String, serde_json::Value>,
}

impl AdminLogEntry {
    /// Create a new entry for `action` performed by `actor_id` on `target_id`
    pub fn new(
        action: AdminAction,
        actor_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            action,
            target_id: target_id.into(),
            details: HashMap::new(),
        }
    }

    /// Attach a detail field to the entry
    pub fn with_detail(mut self, key: &str, value: serde_json::Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}

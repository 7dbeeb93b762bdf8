use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Platform roles, stored as strings in the users table
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "STUDENT")]
    Student,
    #[sea_orm(string_value = "TEACHER")]
    Teacher,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "SUPER_ADMIN")]
    SuperAdmin,
}

impl Role {
    /// String representation matching the database values
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Whether this role may call admin endpoints at all
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Whether a caller with this role may moderate a target with `other`.
    ///
    /// SUPER_ADMIN may act on anyone. ADMIN may only act on non-admin
    /// accounts. Self-targeting is checked separately by the service layer.
    pub fn can_moderate(&self, other: Role) -> bool {
        match self {
            Self::SuperAdmin => true,
            Self::Admin => !other.is_admin(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: String,
    pub role: Role,

    // Moderation state. Invariant: banned implies is_active=false and
    // ban_reason is set; unbanned implies ban_reason is cleared.
    pub is_active: bool,
    pub banned: bool,
    pub ban_reason: Option<String>,

    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Model {
    /// Display name used in admin responses and email templates
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

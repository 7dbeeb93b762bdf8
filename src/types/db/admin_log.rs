use sea_orm::entity::prelude::*;

/// SeaORM entity for the admin_logs table.
///
/// Append-only: rows are inserted by the moderation flows and never
/// updated or deleted. There is intentionally no foreign key to users so
/// the trail survives account deletion.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub actor_id: String,
    pub action: String,
    pub target_id: String,
    pub details: String,
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

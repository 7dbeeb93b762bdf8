use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only audit trail of privileged actions.
        // No foreign key to users: log entries must survive the deletion
        // of both actor and target accounts.
        manager
            .create_table(
                Table::create()
                    .table(AdminLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminLogs::ActorId).string().not_null())
                    .col(ColumnDef::new(AdminLogs::Action).string().not_null())
                    .col(ColumnDef::new(AdminLogs::TargetId).string().not_null())
                    .col(ColumnDef::new(AdminLogs::Details).text().not_null())
                    .col(ColumnDef::new(AdminLogs::Timestamp).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admin_logs_target")
                    .table(AdminLogs::Table)
                    .col(AdminLogs::TargetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admin_logs_actor")
                    .table(AdminLogs::Table)
                    .col(AdminLogs::ActorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminLogs {
    Table,
    Id,
    ActorId,
    Action,
    TargetId,
    Details,
    Timestamp,
}

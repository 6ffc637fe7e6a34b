use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActionItems::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActionItems::Description).text().null())
                    .col(ColumnDef::new(ActionItems::TargetDate).date().not_null())
                    .col(
                        ColumnDef::new(ActionItems::Priority)
                            .string_len(20)
                            .not_null()
                            .default("medium"),
                    )
                    .col(
                        ColumnDef::new(ActionItems::Status)
                            .string_len(30)
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(ActionItems::AssignedTo).uuid().not_null())
                    .col(ColumnDef::new(ActionItems::VerifierId).uuid().null())
                    .col(ColumnDef::new(ActionItems::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(ActionItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ActionItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_items_assigned_to")
                            .from(ActionItems::Table, ActionItems::AssignedTo)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_items_verifier_id")
                            .from(ActionItems::Table, ActionItems::VerifierId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_items_created_by")
                            .from(ActionItems::Table, ActionItems::CreatedBy)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(ActionItems::Table)
                    .name("idx_action_items_assigned_to")
                    .col(ActionItems::AssignedTo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(ActionItems::Table)
                    .name("idx_action_items_status")
                    .col(ActionItems::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_action_items_status")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_action_items_assigned_to")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ActionItems::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum ActionItems {
    Table,
    Id,
    Title,
    Description,
    TargetDate,
    Priority,
    Status,
    AssignedTo,
    VerifierId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}

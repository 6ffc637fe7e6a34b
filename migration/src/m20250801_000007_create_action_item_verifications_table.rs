use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionItemVerifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionItemVerifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // One verification per action item
                    .col(
                        ColumnDef::new(ActionItemVerifications::ActionItemId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ActionItemVerifications::Approved)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActionItemVerifications::Comments)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ActionItemVerifications::VerifiedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActionItemVerifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ActionItemVerifications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_item_verifications_action_item_id")
                            .from(
                                ActionItemVerifications::Table,
                                ActionItemVerifications::ActionItemId,
                            )
                            .to(ActionItems::Table, ActionItems::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_item_verifications_verified_by")
                            .from(
                                ActionItemVerifications::Table,
                                ActionItemVerifications::VerifiedBy,
                            )
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ActionItemVerifications::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum ActionItemVerifications {
    Table,
    Id,
    ActionItemId,
    Approved,
    Comments,
    VerifiedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ActionItems {
    Table,
    Id,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}

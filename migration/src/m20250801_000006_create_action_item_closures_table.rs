use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionItemClosures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionItemClosures::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // One closure per action item
                    .col(
                        ColumnDef::new(ActionItemClosures::ActionItemId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ActionItemClosures::ClosureText)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActionItemClosures::MediaUrls)
                            .json_binary()
                            .null(),
                    )
                    .col(ColumnDef::new(ActionItemClosures::ClosedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(ActionItemClosures::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ActionItemClosures::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_item_closures_action_item_id")
                            .from(
                                ActionItemClosures::Table,
                                ActionItemClosures::ActionItemId,
                            )
                            .to(ActionItems::Table, ActionItems::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_item_closures_closed_by")
                            .from(ActionItemClosures::Table, ActionItemClosures::ClosedBy)
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
            .drop_table(Table::drop().table(ActionItemClosures::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum ActionItemClosures {
    Table,
    Id,
    ActionItemId,
    ClosureText,
    MediaUrls,
    ClosedBy,
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

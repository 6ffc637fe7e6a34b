use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ObjectiveUpdates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ObjectiveUpdates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ObjectiveUpdates::ObjectiveId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ObjectiveUpdates::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ObjectiveUpdates::AchievedCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ObjectiveUpdates::UpdateDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ObjectiveUpdates::Efficiency)
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(ColumnDef::new(ObjectiveUpdates::Photos).json_binary().null())
                    .col(ColumnDef::new(ObjectiveUpdates::Comments).text().null())
                    .col(
                        ColumnDef::new(ObjectiveUpdates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ObjectiveUpdates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_objective_updates_objective_id")
                            .from(ObjectiveUpdates::Table, ObjectiveUpdates::ObjectiveId)
                            .to(Objectives::Table, Objectives::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_objective_updates_user_id")
                            .from(ObjectiveUpdates::Table, ObjectiveUpdates::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Progress derivation reads all updates for an objective ordered by date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(ObjectiveUpdates::Table)
                    .name("idx_objective_updates_objective_id_update_date")
                    .col(ObjectiveUpdates::ObjectiveId)
                    .col(ObjectiveUpdates::UpdateDate)
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
                    .name("idx_objective_updates_objective_id_update_date")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ObjectiveUpdates::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum ObjectiveUpdates {
    Table,
    Id,
    ObjectiveId,
    UserId,
    AchievedCount,
    UpdateDate,
    Efficiency,
    Photos,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Objectives {
    Table,
    Id,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}

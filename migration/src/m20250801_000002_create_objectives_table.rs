use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Objectives::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Objectives::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Objectives::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Objectives::Description).text().null())
                    .col(ColumnDef::new(Objectives::Weightage).integer().not_null())
                    .col(
                        ColumnDef::new(Objectives::NumActivities)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Objectives::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Objectives::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Objectives::TargetDate).date().not_null())
                    .col(
                        ColumnDef::new(Objectives::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Objectives::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_objectives_owner_id")
                            .from(Objectives::Table, Objectives::OwnerId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_objectives_created_by")
                            .from(Objectives::Table, Objectives::CreatedBy)
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
                    .table(Objectives::Table)
                    .name("idx_objectives_owner_id")
                    .col(Objectives::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Objectives::Table)
                    .name("idx_objectives_target_date")
                    .col(Objectives::TargetDate)
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
                    .name("idx_objectives_target_date")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_objectives_owner_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Objectives::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Objectives {
    Table,
    Id,
    Title,
    Description,
    Weightage,
    NumActivities,
    OwnerId,
    CreatedBy,
    TargetDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyWork::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyWork::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyWork::UserId).uuid().not_null())
                    .col(ColumnDef::new(DailyWork::WorkDate).date().not_null())
                    .col(ColumnDef::new(DailyWork::Description).text().not_null())
                    .col(ColumnDef::new(DailyWork::AdminComment).text().null())
                    .col(
                        ColumnDef::new(DailyWork::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DailyWork::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_work_user_id")
                            .from(DailyWork::Table, DailyWork::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One entry per user per date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(DailyWork::Table)
                    .name("idx_daily_work_user_id_work_date")
                    .col(DailyWork::UserId)
                    .col(DailyWork::WorkDate)
                    .unique()
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
                    .name("idx_daily_work_user_id_work_date")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DailyWork::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum DailyWork {
    Table,
    Id,
    UserId,
    WorkDate,
    Description,
    AdminComment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}

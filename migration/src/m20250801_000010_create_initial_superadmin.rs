use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Initial superadmin account.
        // Password: "Sup3rAdm1n$ecurE!" hashed with Argon2id.
        let superadmin_password_hash = "$argon2id$v=19$m=65536,t=3,p=4$rwjnw7itO1QP7YiQLYYPuw$bwYljZ/eNoieCwcPydAbagPt05UT9wcs+n0zH58ZxS4";

        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Profiles::Table)
                    .columns([
                        Profiles::Id,
                        Profiles::Email,
                        Profiles::FullName,
                        Profiles::PasswordHash,
                        Profiles::Role,
                    ])
                    .values_panic([
                        Expr::cust("gen_random_uuid()"),
                        "superadmin@example.com".into(),
                        "System Administrator".into(),
                        superadmin_password_hash.into(),
                        "superadmin".into(),
                    ])
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Profiles::Table)
                    .and_where(Expr::col(Profiles::Email).eq("superadmin@example.com"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    Email,
    FullName,
    PasswordHash,
    Role,
}

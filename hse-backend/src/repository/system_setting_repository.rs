// src/repository/system_setting_repository.rs
use crate::domain::system_setting_model::{
    self, ActiveModel as SettingActiveModel, Entity as SystemSettingRows,
};
use crate::domain::system_settings::SystemSettings;
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};

pub struct SystemSettingRepository {
    db: DbConn,
}

impl SystemSettingRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<system_setting_model::Model>, DbErr> {
        SystemSettingRows::find().all(&self.db).await
    }

    /// The typed settings view, loaded fresh from the table.
    pub async fn load(&self) -> Result<SystemSettings, DbErr> {
        let rows = self.find_all().await?;
        Ok(SystemSettings::from_rows(&rows))
    }

    pub async fn upsert(&self, key: &str, value: serde_json::Value) -> Result<(), DbErr> {
        let existing = SystemSettingRows::find()
            .filter(system_setting_model::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        match existing {
            Some(row) => {
                let mut active: SettingActiveModel = row.into();
                active.value = Set(value);
                active.update(&self.db).await?;
            }
            None => {
                let row = SettingActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value),
                    ..SettingActiveModel::new()
                };
                row.insert(&self.db).await?;
            }
        }

        Ok(())
    }

    pub async fn store(&self, settings: SystemSettings) -> Result<(), DbErr> {
        for (key, value) in settings.to_rows() {
            self.upsert(key, value).await?;
        }
        Ok(())
    }
}

// src/repository/profile_repository.rs
use crate::domain::profile_model::{self, ActiveModel as ProfileActiveModel, Entity as Profiles};
use crate::domain::role::Role;
use chrono::{DateTime, Utc};
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};
use uuid::Uuid;

pub struct ProfileRepository {
    db: DbConn,
}

impl ProfileRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profile_model::Model>, DbErr> {
        Profiles::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<profile_model::Model>, DbErr> {
        Profiles::find()
            .filter(profile_model::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<profile_model::Model>, DbErr> {
        Profiles::find()
            .order_by_asc(profile_model::Column::Email)
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        email: &str,
        full_name: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<profile_model::Model, DbErr> {
        let profile = ProfileActiveModel {
            email: Set(email.to_string()),
            full_name: Set(full_name.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.as_str().to_string()),
            ..ProfileActiveModel::new()
        };

        profile.insert(&self.db).await
    }

    pub async fn update_role(
        &self,
        id: Uuid,
        role: Role,
    ) -> Result<Option<profile_model::Model>, DbErr> {
        let Some(profile) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ProfileActiveModel = profile.into();
        active.role = Set(role.as_str().to_string());
        active.update(&self.db).await.map(Some)
    }

    pub async fn set_banned_until(
        &self,
        id: Uuid,
        banned_until: Option<DateTime<Utc>>,
    ) -> Result<Option<profile_model::Model>, DbErr> {
        let Some(profile) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ProfileActiveModel = profile.into();
        active.banned_until = Set(banned_until);
        active.update(&self.db).await.map(Some)
    }
}

// src/repository/daily_work_repository.rs
use crate::domain::daily_work_model::{self, ActiveModel as DailyWorkActiveModel, Entity as DailyWork};
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};
use uuid::Uuid;

pub struct DailyWorkRepository {
    db: DbConn,
}

impl DailyWorkRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<daily_work_model::Model>, DbErr> {
        DailyWork::find_by_id(id).one(&self.db).await
    }

    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<daily_work_model::Model>, DbErr> {
        DailyWork::find()
            .filter(daily_work_model::Column::UserId.eq(user_id))
            .order_by_desc(daily_work_model::Column::WorkDate)
            .all(&self.db)
            .await
    }

    pub async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        work_date: NaiveDate,
    ) -> Result<Option<daily_work_model::Model>, DbErr> {
        DailyWork::find()
            .filter(daily_work_model::Column::UserId.eq(user_id))
            .filter(daily_work_model::Column::WorkDate.eq(work_date))
            .one(&self.db)
            .await
    }

    /// One entry per user per date: replaces the description when an
    /// entry for the date already exists.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        work_date: NaiveDate,
        description: String,
    ) -> Result<daily_work_model::Model, DbErr> {
        if let Some(existing) = self.find_by_user_and_date(user_id, work_date).await? {
            let mut active: DailyWorkActiveModel = existing.into();
            active.description = Set(description);
            return active.update(&self.db).await;
        }

        let entry = DailyWorkActiveModel {
            user_id: Set(user_id),
            work_date: Set(work_date),
            description: Set(description),
            ..DailyWorkActiveModel::new()
        };

        entry.insert(&self.db).await
    }

    pub async fn set_admin_comment(
        &self,
        id: Uuid,
        admin_comment: Option<String>,
    ) -> Result<Option<daily_work_model::Model>, DbErr> {
        let Some(entry) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: DailyWorkActiveModel = entry.into();
        active.admin_comment = Set(admin_comment);
        active.update(&self.db).await.map(Some)
    }
}

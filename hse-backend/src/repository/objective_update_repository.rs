// src/repository/objective_update_repository.rs
use crate::domain::objective_update_model::{
    self, ActiveModel as UpdateActiveModel, Entity as ObjectiveUpdates,
};
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult, Set};
use uuid::Uuid;

pub struct ObjectiveUpdateRepository {
    db: DbConn,
}

pub struct NewObjectiveUpdate {
    pub objective_id: Uuid,
    pub user_id: Uuid,
    pub achieved_count: i32,
    pub update_date: NaiveDate,
    pub photos: Option<serde_json::Value>,
    pub comments: Option<String>,
}

#[derive(Default)]
pub struct ObjectiveUpdateChanges {
    pub achieved_count: Option<i32>,
    pub update_date: Option<NaiveDate>,
    pub efficiency: Option<i32>,
    pub photos: Option<Option<serde_json::Value>>,
    pub comments: Option<Option<String>>,
}

impl ObjectiveUpdateRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<objective_update_model::Model>, DbErr> {
        ObjectiveUpdates::find_by_id(id).one(&self.db).await
    }

    /// Updates ordered by date, then creation time, so that equal-dated
    /// updates keep insertion order for the latest-efficiency pick.
    pub async fn find_all_for_objective(
        &self,
        objective_id: Uuid,
    ) -> Result<Vec<objective_update_model::Model>, DbErr> {
        ObjectiveUpdates::find()
            .filter(objective_update_model::Column::ObjectiveId.eq(objective_id))
            .order_by_asc(objective_update_model::Column::UpdateDate)
            .order_by_asc(objective_update_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        new: NewObjectiveUpdate,
    ) -> Result<objective_update_model::Model, DbErr> {
        let update = UpdateActiveModel {
            objective_id: Set(new.objective_id),
            user_id: Set(new.user_id),
            achieved_count: Set(new.achieved_count),
            update_date: Set(new.update_date),
            photos: Set(new.photos),
            comments: Set(new.comments),
            ..UpdateActiveModel::new()
        };

        update.insert(&self.db).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: ObjectiveUpdateChanges,
    ) -> Result<Option<objective_update_model::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: UpdateActiveModel = existing.into();
        if let Some(achieved_count) = changes.achieved_count {
            active.achieved_count = Set(achieved_count);
        }
        if let Some(update_date) = changes.update_date {
            active.update_date = Set(update_date);
        }
        if let Some(efficiency) = changes.efficiency {
            active.efficiency = Set(efficiency);
        }
        if let Some(photos) = changes.photos {
            active.photos = Set(photos);
        }
        if let Some(comments) = changes.comments {
            active.comments = Set(comments);
        }

        active.update(&self.db).await.map(Some)
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        ObjectiveUpdates::delete_by_id(id).exec(&self.db).await
    }
}

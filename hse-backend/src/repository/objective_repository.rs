// src/repository/objective_repository.rs
use crate::domain::objective_model::{
    self, ActiveModel as ObjectiveActiveModel, Entity as Objectives,
};
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult, Set};
use uuid::Uuid;

pub struct ObjectiveRepository {
    db: DbConn,
}

pub struct NewObjective {
    pub title: String,
    pub description: Option<String>,
    pub weightage: i32,
    pub num_activities: i32,
    pub owner_id: Uuid,
    pub created_by: Uuid,
    pub target_date: NaiveDate,
}

#[derive(Default)]
pub struct ObjectiveChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub weightage: Option<i32>,
    pub num_activities: Option<i32>,
    pub owner_id: Option<Uuid>,
    pub target_date: Option<NaiveDate>,
}

impl ObjectiveRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<objective_model::Model>, DbErr> {
        Objectives::find_by_id(id).one(&self.db).await
    }

    pub async fn find_all(&self) -> Result<Vec<objective_model::Model>, DbErr> {
        Objectives::find()
            .order_by_desc(objective_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_all_for_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<objective_model::Model>, DbErr> {
        Objectives::find()
            .filter(objective_model::Column::OwnerId.eq(owner_id))
            .order_by_desc(objective_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, new: NewObjective) -> Result<objective_model::Model, DbErr> {
        let objective = ObjectiveActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            weightage: Set(new.weightage),
            num_activities: Set(new.num_activities),
            owner_id: Set(new.owner_id),
            created_by: Set(new.created_by),
            target_date: Set(new.target_date),
            ..ObjectiveActiveModel::new()
        };

        objective.insert(&self.db).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: ObjectiveChanges,
    ) -> Result<Option<objective_model::Model>, DbErr> {
        let Some(objective) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ObjectiveActiveModel = objective.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(weightage) = changes.weightage {
            active.weightage = Set(weightage);
        }
        if let Some(num_activities) = changes.num_activities {
            active.num_activities = Set(num_activities);
        }
        if let Some(owner_id) = changes.owner_id {
            active.owner_id = Set(owner_id);
        }
        if let Some(target_date) = changes.target_date {
            active.target_date = Set(target_date);
        }

        active.update(&self.db).await.map(Some)
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        Objectives::delete_by_id(id).exec(&self.db).await
    }
}

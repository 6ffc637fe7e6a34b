// src/domain/objective_update_model.rs
use super::progress::ProgressUpdate;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "objective_updates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub objective_id: Uuid,

    pub user_id: Uuid,

    /// Activities completed in this update alone; cumulative progress is
    /// the sum over all updates for the objective.
    pub achieved_count: i32,

    pub update_date: NaiveDate,

    /// Percent multiplier, admin-settable. Defaults to 100.
    pub efficiency: i32,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub photos: Option<Json>,

    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::objective_model::Entity",
        from = "Column::ObjectiveId",
        to = "super::objective_model::Column::Id"
    )]
    Objective,

    #[sea_orm(
        belongs_to = "super::profile_model::Entity",
        from = "Column::UserId",
        to = "super::profile_model::Column::Id"
    )]
    User,
}

impl Related<super::objective_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Objective.def()
    }
}

impl Related<super::profile_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            efficiency: Set(100),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

impl From<&Model> for ProgressUpdate {
    fn from(model: &Model) -> Self {
        ProgressUpdate {
            achieved_count: model.achieved_count,
            efficiency: Some(model.efficiency),
            update_date: model.update_date,
        }
    }
}

// src/domain/action_item_model.rs
use super::action_item_status::{ActionItemPriority, ActionItemStatus};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "action_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub target_date: NaiveDate,

    pub priority: String,

    pub status: String,

    pub assigned_to: Uuid,

    #[sea_orm(nullable)]
    pub verifier_id: Option<Uuid>,

    pub created_by: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile_model::Entity",
        from = "Column::AssignedTo",
        to = "super::profile_model::Column::Id"
    )]
    Assignee,

    #[sea_orm(has_many = "super::action_item_closure_model::Entity")]
    Closure,

    #[sea_orm(has_many = "super::action_item_verification_model::Entity")]
    Verification,
}

impl Related<super::profile_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl Related<super::action_item_closure_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Closure.def()
    }
}

impl Related<super::action_item_verification_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Verification.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            priority: Set(ActionItemPriority::Medium.as_str().to_string()),
            status: Set(ActionItemStatus::Open.as_str().to_string()),
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

impl Model {
    /// Parsed status; unknown strings in the database fall back to `open`.
    pub fn status(&self) -> ActionItemStatus {
        ActionItemStatus::from_str(&self.status).unwrap_or_default()
    }

    pub fn priority(&self) -> ActionItemPriority {
        ActionItemPriority::from_str(&self.priority).unwrap_or_default()
    }
}

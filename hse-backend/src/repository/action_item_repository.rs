// src/repository/action_item_repository.rs
use crate::domain::action_item_closure_model::{
    self, ActiveModel as ClosureActiveModel, Entity as Closures,
};
use crate::domain::action_item_model::{self, ActiveModel as ActionItemActiveModel, Entity as ActionItems};
use crate::domain::action_item_status::{ActionItemPriority, ActionItemStatus};
use crate::domain::action_item_verification_model::{
    self, ActiveModel as VerificationActiveModel, Entity as Verifications,
};
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult, Set};
use uuid::Uuid;

pub struct ActionItemRepository {
    db: DbConn,
}

pub struct NewActionItem {
    pub title: String,
    pub description: Option<String>,
    pub target_date: NaiveDate,
    pub priority: ActionItemPriority,
    pub assigned_to: Uuid,
    pub verifier_id: Option<Uuid>,
    pub created_by: Uuid,
}

#[derive(Default)]
pub struct ActionItemChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub target_date: Option<NaiveDate>,
    pub priority: Option<ActionItemPriority>,
    pub assigned_to: Option<Uuid>,
    pub verifier_id: Option<Option<Uuid>>,
}

pub struct NewClosure {
    pub action_item_id: Uuid,
    pub closure_text: String,
    pub media_urls: Option<serde_json::Value>,
    pub closed_by: Uuid,
}

pub struct NewVerification {
    pub action_item_id: Uuid,
    pub approved: bool,
    pub comments: Option<String>,
    pub verified_by: Uuid,
}

impl ActionItemRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<action_item_model::Model>, DbErr> {
        ActionItems::find_by_id(id).one(&self.db).await
    }

    pub async fn find_all(&self) -> Result<Vec<action_item_model::Model>, DbErr> {
        ActionItems::find()
            .order_by_desc(action_item_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_all_for_assignee(
        &self,
        assigned_to: Uuid,
    ) -> Result<Vec<action_item_model::Model>, DbErr> {
        ActionItems::find()
            .filter(action_item_model::Column::AssignedTo.eq(assigned_to))
            .order_by_desc(action_item_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, new: NewActionItem) -> Result<action_item_model::Model, DbErr> {
        let item = ActionItemActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            target_date: Set(new.target_date),
            priority: Set(new.priority.as_str().to_string()),
            assigned_to: Set(new.assigned_to),
            verifier_id: Set(new.verifier_id),
            created_by: Set(new.created_by),
            ..ActionItemActiveModel::new()
        };

        item.insert(&self.db).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: ActionItemChanges,
    ) -> Result<Option<action_item_model::Model>, DbErr> {
        let Some(item) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ActionItemActiveModel = item.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(target_date) = changes.target_date {
            active.target_date = Set(target_date);
        }
        if let Some(priority) = changes.priority {
            active.priority = Set(priority.as_str().to_string());
        }
        if let Some(assigned_to) = changes.assigned_to {
            active.assigned_to = Set(assigned_to);
        }
        if let Some(verifier_id) = changes.verifier_id {
            active.verifier_id = Set(verifier_id);
        }

        active.update(&self.db).await.map(Some)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ActionItemStatus,
    ) -> Result<Option<action_item_model::Model>, DbErr> {
        let Some(item) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ActionItemActiveModel = item.into();
        active.status = Set(status.as_str().to_string());
        active.update(&self.db).await.map(Some)
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        ActionItems::delete_by_id(id).exec(&self.db).await
    }

    // --- Closures (at most one per item) ---

    pub async fn find_closure(
        &self,
        action_item_id: Uuid,
    ) -> Result<Option<action_item_closure_model::Model>, DbErr> {
        Closures::find()
            .filter(action_item_closure_model::Column::ActionItemId.eq(action_item_id))
            .one(&self.db)
            .await
    }

    /// Replaces any existing closure; a resubmission after rejection
    /// supersedes the old evidence.
    pub async fn replace_closure(
        &self,
        new: NewClosure,
    ) -> Result<action_item_closure_model::Model, DbErr> {
        Closures::delete_many()
            .filter(action_item_closure_model::Column::ActionItemId.eq(new.action_item_id))
            .exec(&self.db)
            .await?;

        let closure = ClosureActiveModel {
            action_item_id: Set(new.action_item_id),
            closure_text: Set(new.closure_text),
            media_urls: Set(new.media_urls),
            closed_by: Set(new.closed_by),
            ..ClosureActiveModel::new()
        };

        closure.insert(&self.db).await
    }

    // --- Verifications (at most one per item) ---

    pub async fn find_verification(
        &self,
        action_item_id: Uuid,
    ) -> Result<Option<action_item_verification_model::Model>, DbErr> {
        Verifications::find()
            .filter(action_item_verification_model::Column::ActionItemId.eq(action_item_id))
            .one(&self.db)
            .await
    }

    pub async fn replace_verification(
        &self,
        new: NewVerification,
    ) -> Result<action_item_verification_model::Model, DbErr> {
        Verifications::delete_many()
            .filter(action_item_verification_model::Column::ActionItemId.eq(new.action_item_id))
            .exec(&self.db)
            .await?;

        let verification = VerificationActiveModel {
            action_item_id: Set(new.action_item_id),
            approved: Set(new.approved),
            comments: Set(new.comments),
            verified_by: Set(new.verified_by),
            ..VerificationActiveModel::new()
        };

        verification.insert(&self.db).await
    }

    pub async fn delete_verification(&self, action_item_id: Uuid) -> Result<DeleteResult, DbErr> {
        Verifications::delete_many()
            .filter(action_item_verification_model::Column::ActionItemId.eq(action_item_id))
            .exec(&self.db)
            .await
    }
}

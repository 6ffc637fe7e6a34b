// src/api/dto/action_item_dto.rs
use crate::domain::action_item_closure_model;
use crate::domain::action_item_model;
use crate::domain::action_item_status::{ActionItemPriority, ActionItemStatus};
use crate::domain::action_item_verification_model;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateActionItemDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    pub target_date: NaiveDate,

    #[serde(default)]
    pub priority: ActionItemPriority,

    pub assigned_to: Uuid,

    pub verifier_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize, Validate, Default)]
pub struct UpdateActionItemDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    pub target_date: Option<NaiveDate>,

    pub priority: Option<ActionItemPriority>,

    pub assigned_to: Option<Uuid>,

    pub verifier_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CloseActionItemDto {
    #[validate(length(min = 1, max = 4000, message = "Closure text must be between 1 and 4000 characters"))]
    pub closure_text: String,

    pub media_urls: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct VerifyActionItemDto {
    pub approved: bool,

    #[validate(length(max = 2000, message = "Comments must not exceed 2000 characters"))]
    pub comments: Option<String>,
}

// --- Response DTOs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItemClosureDto {
    pub id: Uuid,
    pub closure_text: String,
    pub media_urls: Option<Vec<String>>,
    pub closed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<action_item_closure_model::Model> for ActionItemClosureDto {
    fn from(model: action_item_closure_model::Model) -> Self {
        let media_urls = model.media_urls.as_ref().and_then(|value| {
            value.as_array().map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
        });

        Self {
            id: model.id,
            closure_text: model.closure_text,
            media_urls,
            closed_by: model.closed_by,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItemVerificationDto {
    pub id: Uuid,
    pub approved: bool,
    pub comments: Option<String>,
    pub verified_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<action_item_verification_model::Model> for ActionItemVerificationDto {
    fn from(model: action_item_verification_model::Model) -> Self {
        Self {
            id: model.id,
            approved: model.approved,
            comments: model.comments,
            verified_by: model.verified_by,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItemDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_date: NaiveDate,
    pub priority: ActionItemPriority,
    pub status: ActionItemStatus,
    pub assigned_to: Uuid,
    pub verifier_id: Option<Uuid>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closure: Option<ActionItemClosureDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<ActionItemVerificationDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActionItemDto {
    pub fn from_model(
        model: action_item_model::Model,
        closure: Option<action_item_closure_model::Model>,
        verification: Option<action_item_verification_model::Model>,
    ) -> Self {
        let status = model.status();
        let priority = model.priority();
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            target_date: model.target_date,
            priority,
            status,
            assigned_to: model.assigned_to,
            verifier_id: model.verifier_id,
            created_by: model.created_by,
            closure: closure.map(Into::into),
            verification: verification.map(Into::into),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

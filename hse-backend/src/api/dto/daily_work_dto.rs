// src/api/dto/daily_work_dto.rs
use crate::domain::daily_work_model;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpsertDailyWorkDto {
    pub work_date: NaiveDate,

    #[validate(length(min = 1, max = 4000, message = "Description must be between 1 and 4000 characters"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AdminCommentDto {
    /// `None` clears the comment.
    #[validate(length(max = 2000, message = "Comment must not exceed 2000 characters"))]
    pub comment: Option<String>,
}

/// Admins may list another user's log.
#[derive(Debug, Deserialize, Default)]
pub struct DailyWorkListQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyWorkDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work_date: NaiveDate,
    pub description: String,
    pub admin_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<daily_work_model::Model> for DailyWorkDto {
    fn from(model: daily_work_model::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            work_date: model.work_date,
            description: model.description,
            admin_comment: model.admin_comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// src/api/dto/objective_dto.rs
use crate::domain::objective_model;
use crate::domain::objective_update_model;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateObjectiveDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 100, message = "Weightage must be between 1 and 100"))]
    pub weightage: i32,

    #[validate(range(min = 1, message = "Number of activities must be at least 1"))]
    pub num_activities: i32,

    /// Admins may assign on behalf of another user; defaults to the caller.
    pub owner_id: Option<Uuid>,

    pub target_date: NaiveDate,
}

#[derive(Debug, Deserialize, Serialize, Validate, Default)]
pub struct UpdateObjectiveDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 100, message = "Weightage must be between 1 and 100"))]
    pub weightage: Option<i32>,

    #[validate(range(min = 1, message = "Number of activities must be at least 1"))]
    pub num_activities: Option<i32>,

    pub owner_id: Option<Uuid>,

    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateObjectiveUpdateDto {
    #[validate(range(min = 0, message = "Achieved count cannot be negative"))]
    pub achieved_count: i32,

    pub update_date: NaiveDate,

    pub photos: Option<Vec<String>>,

    #[validate(length(max = 2000, message = "Comments must not exceed 2000 characters"))]
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, Default)]
pub struct EditObjectiveUpdateDto {
    #[validate(range(min = 0, message = "Achieved count cannot be negative"))]
    pub achieved_count: Option<i32>,

    pub update_date: Option<NaiveDate>,

    /// Admin-only percent multiplier.
    #[validate(range(min = 1, max = 100, message = "Efficiency must be between 1 and 100"))]
    pub efficiency: Option<i32>,

    pub photos: Option<Vec<String>>,

    #[validate(length(max = 2000, message = "Comments must not exceed 2000 characters"))]
    pub comments: Option<String>,
}

// --- Response DTOs ---

/// Objective enriched with derived progress. Progress is recomputed from
/// the update list on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub weightage: i32,
    pub num_activities: i32,
    pub owner_id: Uuid,
    pub created_by: Uuid,
    pub target_date: NaiveDate,
    pub planned_progress: i32,
    pub effective_progress: i32,
    pub cumulative_achieved: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ObjectiveDto {
    pub fn from_model_with_progress(
        model: objective_model::Model,
        planned_progress: i32,
        effective_progress: i32,
        cumulative_achieved: i64,
    ) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            weightage: model.weightage,
            num_activities: model.num_activities,
            owner_id: model.owner_id,
            created_by: model.created_by,
            target_date: model.target_date,
            planned_progress,
            effective_progress,
            cumulative_achieved,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveUpdateDto {
    pub id: Uuid,
    pub objective_id: Uuid,
    pub user_id: Uuid,
    pub achieved_count: i32,
    pub update_date: NaiveDate,
    pub efficiency: i32,
    pub photos: Option<Vec<String>>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<objective_update_model::Model> for ObjectiveUpdateDto {
    fn from(model: objective_update_model::Model) -> Self {
        let photos = model.photos.as_ref().and_then(|value| {
            value.as_array().map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
        });

        Self {
            id: model.id,
            objective_id: model.objective_id,
            user_id: model.user_id,
            achieved_count: model.achieved_count,
            update_date: model.update_date,
            efficiency: model.efficiency,
            photos,
            comments: model.comments,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_objective_validation() {
        let valid = CreateObjectiveDto {
            title: "Reduce recordable incidents".to_string(),
            description: None,
            weightage: 25,
            num_activities: 12,
            owner_id: None,
            target_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        };
        assert!(valid.validate().is_ok());

        let zero_activities = CreateObjectiveDto {
            num_activities: 0,
            ..valid
        };
        assert!(zero_activities.validate().is_err());
    }

    #[test]
    fn test_weightage_bounds() {
        let dto = CreateObjectiveDto {
            title: "Toolbox talks".to_string(),
            description: None,
            weightage: 101,
            num_activities: 4,
            owner_id: None,
            target_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_negative_achieved_count_rejected() {
        let dto = CreateObjectiveUpdateDto {
            achieved_count: -1,
            update_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            photos: None,
            comments: None,
        };
        assert!(dto.validate().is_err());
    }
}

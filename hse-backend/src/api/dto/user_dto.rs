// src/api/dto/user_dto.rs
use crate::domain::profile_model;
use crate::domain::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile as exposed to clients; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub banned_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<profile_model::Model> for ProfileDto {
    fn from(model: profile_model::Model) -> Self {
        let role = model.role();
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            role,
            banned_until: model.banned_until,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateRoleDto {
    pub role: Role,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BanUserDto {
    /// `None` lifts the ban.
    pub banned_until: Option<DateTime<Utc>>,
}

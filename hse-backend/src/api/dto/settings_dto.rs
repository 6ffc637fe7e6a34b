// src/api/dto/settings_dto.rs
use crate::domain::component_permission_model;
use crate::domain::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct UpdateSettingsDto {
    pub updates_enabled: Option<bool>,
    pub maintenance_mode: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpsertComponentPermissionDto {
    pub component: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentPermissionDto {
    pub component: String,
    pub role: Role,
}

impl From<component_permission_model::Model> for ComponentPermissionDto {
    fn from(model: component_permission_model::Model) -> Self {
        let role = model.required_role();
        Self {
            component: model.component,
            role,
        }
    }
}

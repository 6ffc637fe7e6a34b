// src/service/settings_service.rs
use super::require_at_least;
use crate::api::dto::settings_dto::{
    ComponentPermissionDto, UpdateSettingsDto, UpsertComponentPermissionDto,
};
use crate::domain::role::Role;
use crate::domain::system_settings::SystemSettings;
use crate::error::AppResult;
use crate::repository::component_permission_repository::ComponentPermissionRepository;
use crate::repository::system_setting_repository::SystemSettingRepository;
use crate::utils::jwt::UserClaims;
use std::sync::Arc;
use tracing::info;

pub struct SettingsService {
    settings_repo: Arc<SystemSettingRepository>,
    permission_repo: Arc<ComponentPermissionRepository>,
}

impl SettingsService {
    pub fn new(
        settings_repo: Arc<SystemSettingRepository>,
        permission_repo: Arc<ComponentPermissionRepository>,
    ) -> Self {
        Self {
            settings_repo,
            permission_repo,
        }
    }

    pub async fn get_settings(&self, caller: &UserClaims) -> AppResult<SystemSettings> {
        require_at_least(caller, Role::Admin)?;
        Ok(self.settings_repo.load().await?)
    }

    pub async fn update_settings(
        &self,
        caller: &UserClaims,
        request: UpdateSettingsDto,
    ) -> AppResult<SystemSettings> {
        require_at_least(caller, Role::Superadmin)?;

        let mut settings = self.settings_repo.load().await?;
        if let Some(updates_enabled) = request.updates_enabled {
            settings.updates_enabled = updates_enabled;
        }
        if let Some(maintenance_mode) = request.maintenance_mode {
            settings.maintenance_mode = maintenance_mode;
        }

        self.settings_repo.store(settings).await?;

        info!(
            updates_enabled = settings.updates_enabled,
            maintenance_mode = settings.maintenance_mode,
            changed_by = %caller.user_id,
            "System settings updated"
        );

        Ok(settings)
    }

    pub async fn list_component_permissions(
        &self,
        caller: &UserClaims,
    ) -> AppResult<Vec<ComponentPermissionDto>> {
        require_at_least(caller, Role::Admin)?;

        let permissions = self.permission_repo.find_all().await?;
        Ok(permissions.into_iter().map(Into::into).collect())
    }

    pub async fn upsert_component_permission(
        &self,
        caller: &UserClaims,
        request: UpsertComponentPermissionDto,
    ) -> AppResult<ComponentPermissionDto> {
        require_at_least(caller, Role::Superadmin)?;

        let permission = self
            .permission_repo
            .upsert(&request.component, request.role)
            .await?;

        info!(
            component = %permission.component,
            role = %permission.role,
            changed_by = %caller.user_id,
            "Component permission updated"
        );

        Ok(permission.into())
    }

    /// Whether a role may use a component. Components without a row
    /// default to the lowest role.
    pub async fn component_allowed(&self, component: &str, role: Role) -> AppResult<bool> {
        let required = self
            .permission_repo
            .find_by_component(component)
            .await?
            .map(|row| row.required_role())
            .unwrap_or_default();

        Ok(role.has_at_least(required))
    }
}

// src/service/user_service.rs
use super::require_at_least;
use crate::api::dto::user_dto::{BanUserDto, ProfileDto, UpdateRoleDto};
use crate::domain::role::Role;
use crate::error::{AppError, AppResult};
use crate::repository::profile_repository::ProfileRepository;
use crate::utils::jwt::UserClaims;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct UserService {
    profile_repo: Arc<ProfileRepository>,
}

impl UserService {
    pub fn new(profile_repo: Arc<ProfileRepository>) -> Self {
        Self { profile_repo }
    }

    pub async fn list_users(&self, caller: &UserClaims) -> AppResult<Vec<ProfileDto>> {
        require_at_least(caller, Role::Admin)?;

        let profiles = self.profile_repo.find_all().await?;
        Ok(profiles.into_iter().map(Into::into).collect())
    }

    pub async fn update_role(
        &self,
        caller: &UserClaims,
        user_id: Uuid,
        request: UpdateRoleDto,
    ) -> AppResult<ProfileDto> {
        require_at_least(caller, Role::Superadmin)?;

        if caller.user_id == user_id {
            return Err(AppError::BadRequest(
                "Cannot change your own role".to_string(),
            ));
        }

        let profile = self
            .profile_repo
            .update_role(user_id, request.role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        info!(
            user_id = %user_id,
            new_role = %request.role,
            changed_by = %caller.user_id,
            "User role changed"
        );

        Ok(profile.into())
    }

    pub async fn ban_user(
        &self,
        caller: &UserClaims,
        user_id: Uuid,
        request: BanUserDto,
    ) -> AppResult<ProfileDto> {
        require_at_least(caller, Role::Superadmin)?;

        if caller.user_id == user_id {
            return Err(AppError::BadRequest("Cannot ban your own account".to_string()));
        }

        let profile = self
            .profile_repo
            .set_banned_until(user_id, request.banned_until)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        match request.banned_until {
            Some(until) => info!(user_id = %user_id, banned_until = %until, "User banned"),
            None => info!(user_id = %user_id, "User ban lifted"),
        }

        Ok(profile.into())
    }
}

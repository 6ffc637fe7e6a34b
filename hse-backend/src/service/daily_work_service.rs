// src/service/daily_work_service.rs
use super::require_at_least;
use crate::api::dto::daily_work_dto::{AdminCommentDto, DailyWorkDto, UpsertDailyWorkDto};
use crate::domain::role::Role;
use crate::error::{AppError, AppResult};
use crate::repository::daily_work_repository::DailyWorkRepository;
use crate::repository::system_setting_repository::SystemSettingRepository;
use crate::utils::jwt::UserClaims;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct DailyWorkService {
    daily_work_repo: Arc<DailyWorkRepository>,
    settings_repo: Arc<SystemSettingRepository>,
}

impl DailyWorkService {
    pub fn new(
        daily_work_repo: Arc<DailyWorkRepository>,
        settings_repo: Arc<SystemSettingRepository>,
    ) -> Self {
        Self {
            daily_work_repo,
            settings_repo,
        }
    }

    async fn ensure_not_in_maintenance(&self, caller: &UserClaims) -> AppResult<()> {
        let settings = self.settings_repo.load().await?;
        if settings.maintenance_mode && !caller.has_at_least(Role::Superadmin) {
            return Err(AppError::ValidationError(
                "System is in maintenance mode".to_string(),
            ));
        }
        Ok(())
    }

    /// Own log by default; admins may read any user's log.
    pub async fn list(
        &self,
        caller: &UserClaims,
        user_id: Option<Uuid>,
    ) -> AppResult<Vec<DailyWorkDto>> {
        let target = match user_id {
            Some(other) if other != caller.user_id => {
                require_at_least(caller, Role::Admin)?;
                other
            }
            _ => caller.user_id,
        };

        let entries = self.daily_work_repo.find_all_for_user(target).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// One entry per user per date; re-submitting a date replaces the
    /// description.
    pub async fn upsert(
        &self,
        caller: &UserClaims,
        request: UpsertDailyWorkDto,
    ) -> AppResult<DailyWorkDto> {
        self.ensure_not_in_maintenance(caller).await?;

        let entry = self
            .daily_work_repo
            .upsert(caller.user_id, request.work_date, request.description)
            .await?;

        info!(
            user_id = %caller.user_id,
            work_date = %entry.work_date,
            "Daily work entry recorded"
        );

        Ok(entry.into())
    }

    pub async fn set_admin_comment(
        &self,
        caller: &UserClaims,
        entry_id: Uuid,
        request: AdminCommentDto,
    ) -> AppResult<DailyWorkDto> {
        require_at_least(caller, Role::Admin)?;
        self.ensure_not_in_maintenance(caller).await?;

        let entry = self
            .daily_work_repo
            .set_admin_comment(entry_id, request.comment)
            .await?
            .ok_or_else(|| AppError::NotFound("Daily work entry not found".to_string()))?;

        info!(entry_id = %entry_id, commented_by = %caller.user_id, "Admin comment set");

        Ok(entry.into())
    }
}

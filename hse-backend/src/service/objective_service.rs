// src/service/objective_service.rs
use super::require_at_least;
use crate::api::dto::objective_dto::{
    CreateObjectiveDto, CreateObjectiveUpdateDto, EditObjectiveUpdateDto, ObjectiveDto,
    ObjectiveUpdateDto, UpdateObjectiveDto,
};
use crate::domain::objective_model;
use crate::domain::progress::{
    cumulative_achieved, effective_progress, planned_progress, ProgressUpdate,
};
use crate::domain::role::Role;
use crate::error::{AppError, AppResult};
use crate::repository::objective_repository::{NewObjective, ObjectiveChanges, ObjectiveRepository};
use crate::repository::objective_update_repository::{
    NewObjectiveUpdate, ObjectiveUpdateChanges, ObjectiveUpdateRepository,
};
use crate::repository::profile_repository::ProfileRepository;
use crate::repository::system_setting_repository::SystemSettingRepository;
use crate::utils::jwt::UserClaims;
use crate::utils::validation::is_quarter_end_2025;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct ObjectiveService {
    objective_repo: Arc<ObjectiveRepository>,
    update_repo: Arc<ObjectiveUpdateRepository>,
    profile_repo: Arc<ProfileRepository>,
    settings_repo: Arc<SystemSettingRepository>,
}

impl ObjectiveService {
    pub fn new(
        objective_repo: Arc<ObjectiveRepository>,
        update_repo: Arc<ObjectiveUpdateRepository>,
        profile_repo: Arc<ProfileRepository>,
        settings_repo: Arc<SystemSettingRepository>,
    ) -> Self {
        Self {
            objective_repo,
            update_repo,
            profile_repo,
            settings_repo,
        }
    }

    /// Mutations are refused during maintenance, except for superadmins.
    async fn ensure_not_in_maintenance(&self, caller: &UserClaims) -> AppResult<()> {
        let settings = self.settings_repo.load().await?;
        if settings.maintenance_mode && !caller.has_at_least(Role::Superadmin) {
            return Err(AppError::ValidationError(
                "System is in maintenance mode".to_string(),
            ));
        }
        Ok(())
    }

    fn check_target_date(target_date: chrono::NaiveDate) -> AppResult<()> {
        if !is_quarter_end_2025(target_date) {
            return Err(AppError::ValidationError(
                "Target date must be a 2025 quarter-end date".to_string(),
            ));
        }
        Ok(())
    }

    /// Derives the progress view for one objective; always recomputed
    /// from the full update list.
    async fn with_progress(&self, objective: objective_model::Model) -> AppResult<ObjectiveDto> {
        let updates = self
            .update_repo
            .find_all_for_objective(objective.id)
            .await?;
        let progress_updates: Vec<ProgressUpdate> =
            updates.iter().map(ProgressUpdate::from).collect();

        let today = Utc::now().date_naive();
        let planned = planned_progress(objective.target_date, today);
        let effective = effective_progress(&progress_updates, objective.num_activities);
        let cumulative = cumulative_achieved(&progress_updates);

        Ok(ObjectiveDto::from_model_with_progress(
            objective, planned, effective, cumulative,
        ))
    }

    async fn find_objective(&self, id: Uuid) -> AppResult<objective_model::Model> {
        self.objective_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Objective not found".to_string()))
    }

    fn ensure_owner_or_admin(caller: &UserClaims, owner_id: Uuid) -> AppResult<()> {
        if caller.user_id == owner_id || caller.has_at_least(Role::Admin) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only the owner or an admin may access this objective".to_string(),
            ))
        }
    }

    // --- Objectives ---

    /// Admins see every objective, users their own.
    pub async fn list(&self, caller: &UserClaims) -> AppResult<Vec<ObjectiveDto>> {
        let objectives = if caller.has_at_least(Role::Admin) {
            self.objective_repo.find_all().await?
        } else {
            self.objective_repo.find_all_for_owner(caller.user_id).await?
        };

        let mut dtos = Vec::with_capacity(objectives.len());
        for objective in objectives {
            dtos.push(self.with_progress(objective).await?);
        }
        Ok(dtos)
    }

    pub async fn get(&self, caller: &UserClaims, id: Uuid) -> AppResult<ObjectiveDto> {
        let objective = self.find_objective(id).await?;
        Self::ensure_owner_or_admin(caller, objective.owner_id)?;
        self.with_progress(objective).await
    }

    pub async fn create(
        &self,
        caller: &UserClaims,
        request: CreateObjectiveDto,
    ) -> AppResult<ObjectiveDto> {
        self.ensure_not_in_maintenance(caller).await?;
        Self::check_target_date(request.target_date)?;

        // Owner defaults to the caller; assigning to someone else is an
        // admin operation.
        let owner_id = request.owner_id.unwrap_or(caller.user_id);
        if owner_id != caller.user_id {
            require_at_least(caller, Role::Admin)?;
            self.profile_repo
                .find_by_id(owner_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Owner profile not found".to_string()))?;
        }

        let objective = self
            .objective_repo
            .create(NewObjective {
                title: request.title,
                description: request.description,
                weightage: request.weightage,
                num_activities: request.num_activities,
                owner_id,
                created_by: caller.user_id,
                target_date: request.target_date,
            })
            .await?;

        info!(
            objective_id = %objective.id,
            owner_id = %owner_id,
            created_by = %caller.user_id,
            "Objective created"
        );

        self.with_progress(objective).await
    }

    pub async fn update(
        &self,
        caller: &UserClaims,
        id: Uuid,
        request: UpdateObjectiveDto,
    ) -> AppResult<ObjectiveDto> {
        self.ensure_not_in_maintenance(caller).await?;

        let objective = self.find_objective(id).await?;
        Self::ensure_owner_or_admin(caller, objective.owner_id)?;

        if let Some(target_date) = request.target_date {
            Self::check_target_date(target_date)?;
        }
        if request.owner_id.is_some_and(|owner| owner != objective.owner_id) {
            require_at_least(caller, Role::Admin)?;
        }

        let updated = self
            .objective_repo
            .update(
                id,
                ObjectiveChanges {
                    title: request.title,
                    description: request.description.map(Some),
                    weightage: request.weightage,
                    num_activities: request.num_activities,
                    owner_id: request.owner_id,
                    target_date: request.target_date,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Objective not found".to_string()))?;

        self.with_progress(updated).await
    }

    pub async fn delete(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        require_at_least(caller, Role::Admin)?;
        self.ensure_not_in_maintenance(caller).await?;

        let objective = self.find_objective(id).await?;
        self.objective_repo.delete(objective.id).await?;

        info!(objective_id = %id, deleted_by = %caller.user_id, "Objective deleted");
        Ok(())
    }

    // --- Progress updates ---

    pub async fn list_updates(
        &self,
        caller: &UserClaims,
        objective_id: Uuid,
    ) -> AppResult<Vec<ObjectiveUpdateDto>> {
        let objective = self.find_objective(objective_id).await?;
        Self::ensure_owner_or_admin(caller, objective.owner_id)?;

        let updates = self.update_repo.find_all_for_objective(objective_id).await?;
        Ok(updates.into_iter().map(Into::into).collect())
    }

    pub async fn create_update(
        &self,
        caller: &UserClaims,
        objective_id: Uuid,
        request: CreateObjectiveUpdateDto,
    ) -> AppResult<ObjectiveUpdateDto> {
        self.ensure_not_in_maintenance(caller).await?;

        let settings = self.settings_repo.load().await?;
        if !settings.updates_enabled {
            return Err(AppError::ValidationError(
                "Progress updates are currently disabled".to_string(),
            ));
        }

        let objective = self.find_objective(objective_id).await?;

        // Only the owner reports progress on their objective
        if objective.owner_id != caller.user_id {
            return Err(AppError::Forbidden(
                "Only the objective owner may submit progress updates".to_string(),
            ));
        }

        // Deadline check against the objective's target date
        let today = Utc::now().date_naive();
        if today > objective.target_date {
            return Err(AppError::ValidationError(
                "The objective's target date has passed; updates are no longer accepted"
                    .to_string(),
            ));
        }
        if request.update_date > objective.target_date {
            return Err(AppError::ValidationError(
                "Update date cannot be after the objective's target date".to_string(),
            ));
        }

        let update = self
            .update_repo
            .create(NewObjectiveUpdate {
                objective_id,
                user_id: caller.user_id,
                achieved_count: request.achieved_count,
                update_date: request.update_date,
                photos: request.photos.map(|urls| serde_json::json!(urls)),
                comments: request.comments,
            })
            .await?;

        info!(
            objective_id = %objective_id,
            update_id = %update.id,
            achieved_count = update.achieved_count,
            "Progress update recorded"
        );

        Ok(update.into())
    }

    pub async fn edit_update(
        &self,
        caller: &UserClaims,
        update_id: Uuid,
        request: EditObjectiveUpdateDto,
    ) -> AppResult<ObjectiveUpdateDto> {
        self.ensure_not_in_maintenance(caller).await?;

        let update = self
            .update_repo
            .find_by_id(update_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Progress update not found".to_string()))?;

        if update.user_id != caller.user_id && !caller.has_at_least(Role::Admin) {
            return Err(AppError::Forbidden(
                "Only the author or an admin may edit this update".to_string(),
            ));
        }

        // The efficiency multiplier is an admin instrument
        if request.efficiency.is_some() {
            require_at_least(caller, Role::Admin)?;
        }

        let edited = self
            .update_repo
            .update(
                update_id,
                ObjectiveUpdateChanges {
                    achieved_count: request.achieved_count,
                    update_date: request.update_date,
                    efficiency: request.efficiency,
                    photos: request.photos.map(|urls| Some(serde_json::json!(urls))),
                    comments: request.comments.map(Some),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Progress update not found".to_string()))?;

        info!(update_id = %update_id, edited_by = %caller.user_id, "Progress update edited");

        Ok(edited.into())
    }

    pub async fn delete_update(&self, caller: &UserClaims, update_id: Uuid) -> AppResult<()> {
        require_at_least(caller, Role::Admin)?;
        self.ensure_not_in_maintenance(caller).await?;

        let update = self
            .update_repo
            .find_by_id(update_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Progress update not found".to_string()))?;

        self.update_repo.delete(update.id).await?;

        info!(update_id = %update_id, deleted_by = %caller.user_id, "Progress update deleted");
        Ok(())
    }
}

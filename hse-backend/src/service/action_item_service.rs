// src/service/action_item_service.rs
use super::require_at_least;
use crate::api::dto::action_item_dto::{
    ActionItemDto, CloseActionItemDto, CreateActionItemDto, UpdateActionItemDto,
    VerifyActionItemDto,
};
use crate::domain::action_item_model;
use crate::domain::action_item_status::ActionItemStatus;
use crate::domain::role::Role;
use crate::error::{AppError, AppResult};
use crate::repository::action_item_repository::{
    ActionItemChanges, ActionItemRepository, NewActionItem, NewClosure, NewVerification,
};
use crate::repository::profile_repository::ProfileRepository;
use crate::repository::system_setting_repository::SystemSettingRepository;
use crate::utils::jwt::UserClaims;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct ActionItemService {
    action_item_repo: Arc<ActionItemRepository>,
    profile_repo: Arc<ProfileRepository>,
    settings_repo: Arc<SystemSettingRepository>,
}

impl ActionItemService {
    pub fn new(
        action_item_repo: Arc<ActionItemRepository>,
        profile_repo: Arc<ProfileRepository>,
        settings_repo: Arc<SystemSettingRepository>,
    ) -> Self {
        Self {
            action_item_repo,
            profile_repo,
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

    async fn find_item(&self, id: Uuid) -> AppResult<action_item_model::Model> {
        self.action_item_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Action item not found".to_string()))
    }

    fn is_participant(caller: &UserClaims, item: &action_item_model::Model) -> bool {
        caller.user_id == item.assigned_to
            || caller.user_id == item.created_by
            || item.verifier_id == Some(caller.user_id)
    }

    /// Resolves the full view: item plus its closure and verification.
    async fn to_dto(&self, item: action_item_model::Model) -> AppResult<ActionItemDto> {
        let closure = self.action_item_repo.find_closure(item.id).await?;
        let verification = self.action_item_repo.find_verification(item.id).await?;
        Ok(ActionItemDto::from_model(item, closure, verification))
    }

    pub async fn list(&self, caller: &UserClaims) -> AppResult<Vec<ActionItemDto>> {
        let items = if caller.has_at_least(Role::Admin) {
            self.action_item_repo.find_all().await?
        } else {
            self.action_item_repo
                .find_all_for_assignee(caller.user_id)
                .await?
        };

        let mut dtos = Vec::with_capacity(items.len());
        for item in items {
            dtos.push(self.to_dto(item).await?);
        }
        Ok(dtos)
    }

    pub async fn get(&self, caller: &UserClaims, id: Uuid) -> AppResult<ActionItemDto> {
        let item = self.find_item(id).await?;
        if !Self::is_participant(caller, &item) && !caller.has_at_least(Role::Admin) {
            return Err(AppError::Forbidden(
                "Not a participant of this action item".to_string(),
            ));
        }
        self.to_dto(item).await
    }

    pub async fn create(
        &self,
        caller: &UserClaims,
        request: CreateActionItemDto,
    ) -> AppResult<ActionItemDto> {
        self.ensure_not_in_maintenance(caller).await?;

        self.profile_repo
            .find_by_id(request.assigned_to)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignee profile not found".to_string()))?;

        if let Some(verifier_id) = request.verifier_id {
            if verifier_id == request.assigned_to {
                return Err(AppError::ValidationError(
                    "Verifier cannot be the assignee".to_string(),
                ));
            }
            self.profile_repo
                .find_by_id(verifier_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Verifier profile not found".to_string()))?;
        }

        let item = self
            .action_item_repo
            .create(NewActionItem {
                title: request.title,
                description: request.description,
                target_date: request.target_date,
                priority: request.priority,
                assigned_to: request.assigned_to,
                verifier_id: request.verifier_id,
                created_by: caller.user_id,
            })
            .await?;

        info!(
            action_item_id = %item.id,
            assigned_to = %item.assigned_to,
            priority = %item.priority,
            "Action item created"
        );

        self.to_dto(item).await
    }

    pub async fn update(
        &self,
        caller: &UserClaims,
        id: Uuid,
        request: UpdateActionItemDto,
    ) -> AppResult<ActionItemDto> {
        self.ensure_not_in_maintenance(caller).await?;

        let item = self.find_item(id).await?;
        if caller.user_id != item.created_by && !caller.has_at_least(Role::Admin) {
            return Err(AppError::Forbidden(
                "Only the creator or an admin may edit this action item".to_string(),
            ));
        }
        if item.status().is_finished() {
            return Err(AppError::ValidationError(
                "Finished action items cannot be edited".to_string(),
            ));
        }

        if let Some(assigned_to) = request.assigned_to {
            self.profile_repo
                .find_by_id(assigned_to)
                .await?
                .ok_or_else(|| AppError::NotFound("Assignee profile not found".to_string()))?;
        }

        let updated = self
            .action_item_repo
            .update(
                id,
                ActionItemChanges {
                    title: request.title,
                    description: request.description.map(Some),
                    target_date: request.target_date,
                    priority: request.priority,
                    assigned_to: request.assigned_to,
                    verifier_id: request.verifier_id.map(Some),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Action item not found".to_string()))?;

        self.to_dto(updated).await
    }

    pub async fn delete(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        require_at_least(caller, Role::Admin)?;
        self.ensure_not_in_maintenance(caller).await?;

        let item = self.find_item(id).await?;
        self.action_item_repo.delete(item.id).await?;

        info!(action_item_id = %id, deleted_by = %caller.user_id, "Action item deleted");
        Ok(())
    }

    /// Assignee submits closure evidence. The item moves to
    /// `pending_verification` when a verifier is set, straight to
    /// `closed` otherwise. A resubmission after rejection replaces the
    /// previous closure and clears the rejection verdict.
    pub async fn close(
        &self,
        caller: &UserClaims,
        id: Uuid,
        request: CloseActionItemDto,
    ) -> AppResult<ActionItemDto> {
        self.ensure_not_in_maintenance(caller).await?;

        let item = self.find_item(id).await?;
        if caller.user_id != item.assigned_to {
            return Err(AppError::Forbidden(
                "Only the assignee may close this action item".to_string(),
            ));
        }

        let next_status = if item.verifier_id.is_some() {
            ActionItemStatus::PendingVerification
        } else {
            ActionItemStatus::Closed
        };

        let current = item.status();
        if !current.can_transition_to(next_status) {
            return Err(AppError::Conflict(format!(
                "Cannot close an action item in status '{}'",
                current
            )));
        }

        self.action_item_repo
            .replace_closure(NewClosure {
                action_item_id: item.id,
                closure_text: request.closure_text,
                media_urls: request.media_urls.map(|urls| serde_json::json!(urls)),
                closed_by: caller.user_id,
            })
            .await?;

        // A fresh submission supersedes any earlier rejection
        self.action_item_repo.delete_verification(item.id).await?;

        let updated = self
            .action_item_repo
            .set_status(item.id, next_status)
            .await?
            .ok_or_else(|| AppError::NotFound("Action item not found".to_string()))?;

        info!(
            action_item_id = %id,
            status = %next_status,
            closed_by = %caller.user_id,
            "Action item closure submitted"
        );

        self.to_dto(updated).await
    }

    /// Verifier approves or rejects a pending item. Rejection re-opens it.
    pub async fn verify(
        &self,
        caller: &UserClaims,
        id: Uuid,
        request: VerifyActionItemDto,
    ) -> AppResult<ActionItemDto> {
        self.ensure_not_in_maintenance(caller).await?;

        let item = self.find_item(id).await?;
        let is_verifier = item.verifier_id == Some(caller.user_id);
        if !is_verifier && !caller.has_at_least(Role::Admin) {
            return Err(AppError::Forbidden(
                "Only the designated verifier or an admin may verify this action item".to_string(),
            ));
        }

        let next_status = if request.approved {
            ActionItemStatus::Verified
        } else {
            ActionItemStatus::Open
        };

        let current = item.status();
        if !current.can_transition_to(next_status) {
            return Err(AppError::Conflict(format!(
                "Cannot verify an action item in status '{}'",
                current
            )));
        }

        self.action_item_repo
            .replace_verification(NewVerification {
                action_item_id: item.id,
                approved: request.approved,
                comments: request.comments,
                verified_by: caller.user_id,
            })
            .await?;

        let updated = self
            .action_item_repo
            .set_status(item.id, next_status)
            .await?
            .ok_or_else(|| AppError::NotFound("Action item not found".to_string()))?;

        info!(
            action_item_id = %id,
            approved = request.approved,
            verified_by = %caller.user_id,
            "Action item verification recorded"
        );

        self.to_dto(updated).await
    }
}

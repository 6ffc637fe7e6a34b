// src/api/mod.rs
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::infrastructure::document_store::FirestoreAdapter;
use crate::infrastructure::relational_store::RelationalStoreAdapter;
use crate::infrastructure::store_adapter::StoreAdapter;
use crate::repository::action_item_repository::ActionItemRepository;
use crate::repository::component_permission_repository::ComponentPermissionRepository;
use crate::repository::daily_work_repository::DailyWorkRepository;
use crate::repository::objective_repository::ObjectiveRepository;
use crate::repository::objective_update_repository::ObjectiveUpdateRepository;
use crate::repository::profile_repository::ProfileRepository;
use crate::repository::system_setting_repository::SystemSettingRepository;
use crate::service::action_item_service::ActionItemService;
use crate::service::auth_service::AuthService;
use crate::service::backup_service::BackupService;
use crate::service::daily_work_service::DailyWorkService;
use crate::service::objective_service::ObjectiveService;
use crate::service::settings_service::SettingsService;
use crate::service::user_service::UserService;
use crate::utils::jwt::{JwtConfig, JwtManager};
use crate::utils::password::PasswordManager;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// Application state carried by every router.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub objective_service: Arc<ObjectiveService>,
    pub action_item_service: Arc<ActionItemService>,
    pub daily_work_service: Arc<DailyWorkService>,
    pub settings_service: Arc<SettingsService>,
    pub backup_service: Arc<BackupService>,
    pub jwt_manager: Arc<JwtManager>,
    pub profile_repo: Arc<ProfileRepository>,
}

impl AppState {
    pub fn build(db: DatabaseConnection, config: &AppConfig) -> AppResult<Self> {
        let jwt_manager = Arc::new(
            JwtManager::new(JwtConfig::with_secret(config.jwt_secret.clone())).map_err(|e| {
                crate::error::AppError::InternalServerError(format!(
                    "Invalid JWT configuration: {}",
                    e
                ))
            })?,
        );
        let password_manager = Arc::new(PasswordManager::default());

        let profile_repo = Arc::new(ProfileRepository::new(db.clone()));
        let objective_repo = Arc::new(ObjectiveRepository::new(db.clone()));
        let update_repo = Arc::new(ObjectiveUpdateRepository::new(db.clone()));
        let daily_work_repo = Arc::new(DailyWorkRepository::new(db.clone()));
        let action_item_repo = Arc::new(ActionItemRepository::new(db.clone()));
        let settings_repo = Arc::new(SystemSettingRepository::new(db.clone()));
        let permission_repo = Arc::new(ComponentPermissionRepository::new(db.clone()));

        let relational_store: Arc<dyn StoreAdapter> = Arc::new(RelationalStoreAdapter::new(db));
        let document_store: Option<Arc<dyn StoreAdapter>> = config
            .firestore
            .clone()
            .map(|firestore| Arc::new(FirestoreAdapter::new(firestore)) as Arc<dyn StoreAdapter>);

        Ok(Self {
            auth_service: Arc::new(AuthService::new(
                profile_repo.clone(),
                password_manager,
                jwt_manager.clone(),
            )),
            user_service: Arc::new(UserService::new(profile_repo.clone())),
            objective_service: Arc::new(ObjectiveService::new(
                objective_repo,
                update_repo,
                profile_repo.clone(),
                settings_repo.clone(),
            )),
            action_item_service: Arc::new(ActionItemService::new(
                action_item_repo,
                profile_repo.clone(),
                settings_repo.clone(),
            )),
            daily_work_service: Arc::new(DailyWorkService::new(
                daily_work_repo,
                settings_repo.clone(),
            )),
            settings_service: Arc::new(SettingsService::new(settings_repo, permission_repo)),
            backup_service: Arc::new(BackupService::new(relational_store, document_store)),
            jwt_manager,
            profile_repo,
        })
    }
}

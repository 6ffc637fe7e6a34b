// src/api/handlers/admin_handler.rs
use super::UuidPath;
use crate::api::dto::backup_dto::RestoreRequest;
use crate::api::dto::common::ApiResponse;
use crate::api::dto::user_dto::{BanUserDto, UpdateRoleDto};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Router,
};
use tracing::info;

pub async fn list_users_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let users = app_state.user_service.list_users(&user.claims).await?;
    Ok(ApiResponse::success("Users", users))
}

pub async fn update_role_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateRoleDto>,
) -> AppResult<impl IntoResponse> {
    let updated = app_state
        .user_service
        .update_role(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success("Role updated", updated))
}

pub async fn ban_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<BanUserDto>,
) -> AppResult<impl IntoResponse> {
    let updated = app_state
        .user_service
        .ban_user(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success("Ban updated", updated))
}

/// Full snapshot of every application table. The document is returned
/// directly so the client can persist it for a later restore.
pub async fn backup_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    info!(requested_by = %user.user_id(), "Backup requested");

    let backup = app_state.backup_service.backup(&user.claims).await?;
    Ok(ApiResponse::success("Backup created", backup))
}

/// Destructive restore into the selected platform. Per-table failures
/// are reported in the body, not as an HTTP error.
pub async fn restore_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RestoreRequest>,
) -> AppResult<impl IntoResponse> {
    info!(requested_by = %user.user_id(), "Restore requested");

    let report = app_state
        .backup_service
        .restore(&user.claims, payload)
        .await?;
    Ok(ApiResponse::success("Restore finished", report))
}

pub fn admin_router(app_state: AppState) -> Router {
    Router::new()
        .route("/admin/users", get(list_users_handler))
        .route("/admin/users/{id}/role", patch(update_role_handler))
        .route("/admin/users/{id}/ban", patch(ban_user_handler))
        .route("/admin/backup", post(backup_handler))
        .route("/admin/restore", post(restore_handler))
        .with_state(app_state)
}

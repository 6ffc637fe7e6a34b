// src/api/handlers/system_handler.rs
use crate::api::dto::common::ApiResponse;
use crate::api::dto::settings_dto::{UpdateSettingsDto, UpsertComponentPermissionDto};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::get,
    Router,
};

pub async fn health_check_handler() -> impl IntoResponse {
    ApiResponse::success("OK", serde_json::json!({ "status": "healthy" }))
}

pub async fn get_settings_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let settings = app_state.settings_service.get_settings(&user.claims).await?;
    Ok(ApiResponse::success("System settings", settings))
}

pub async fn update_settings_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateSettingsDto>,
) -> AppResult<impl IntoResponse> {
    let settings = app_state
        .settings_service
        .update_settings(&user.claims, payload)
        .await?;

    Ok(ApiResponse::success("System settings updated", settings))
}

pub async fn list_component_permissions_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let permissions = app_state
        .settings_service
        .list_component_permissions(&user.claims)
        .await?;

    Ok(ApiResponse::success("Component permissions", permissions))
}

pub async fn upsert_component_permission_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpsertComponentPermissionDto>,
) -> AppResult<impl IntoResponse> {
    let permission = app_state
        .settings_service
        .upsert_component_permission(&user.claims, payload)
        .await?;

    Ok(ApiResponse::success("Component permission saved", permission))
}

pub fn health_router() -> Router {
    Router::new().route("/health", get(health_check_handler))
}

pub fn settings_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/admin/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route(
            "/admin/component-permissions",
            get(list_component_permissions_handler).put(upsert_component_permission_handler),
        )
        .with_state(app_state)
}

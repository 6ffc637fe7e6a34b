// src/api/handlers/daily_work_handler.rs
use super::UuidPath;
use crate::api::dto::common::ApiResponse;
use crate::api::dto::daily_work_dto::{AdminCommentDto, DailyWorkListQuery, UpsertDailyWorkDto};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Router,
};
use validator::Validate;

pub async fn list_daily_work_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<DailyWorkListQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = app_state
        .daily_work_service
        .list(&user.claims, query.user_id)
        .await?;
    Ok(ApiResponse::success("Daily work entries", entries))
}

pub async fn upsert_daily_work_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpsertDailyWorkDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let entry = app_state
        .daily_work_service
        .upsert(&user.claims, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Daily work entry recorded", entry),
    ))
}

pub async fn set_admin_comment_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<AdminCommentDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let entry = app_state
        .daily_work_service
        .set_admin_comment(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success("Admin comment saved", entry))
}

pub fn daily_work_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/daily-work",
            get(list_daily_work_handler).post(upsert_daily_work_handler),
        )
        .route("/daily-work/{id}/comment", patch(set_admin_comment_handler))
        .with_state(app_state)
}

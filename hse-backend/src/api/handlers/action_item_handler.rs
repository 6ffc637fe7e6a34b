// src/api/handlers/action_item_handler.rs
use super::UuidPath;
use crate::api::dto::action_item_dto::{
    CloseActionItemDto, CreateActionItemDto, UpdateActionItemDto, VerifyActionItemDto,
};
use crate::api::dto::common::ApiResponse;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use validator::Validate;

pub async fn list_action_items_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let items = app_state.action_item_service.list(&user.claims).await?;
    Ok(ApiResponse::success("Action items", items))
}

pub async fn create_action_item_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateActionItemDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let item = app_state
        .action_item_service
        .create(&user.claims, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Action item created", item),
    ))
}

pub async fn get_action_item_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<impl IntoResponse> {
    let item = app_state.action_item_service.get(&user.claims, id).await?;
    Ok(ApiResponse::success("Action item", item))
}

pub async fn update_action_item_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateActionItemDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let item = app_state
        .action_item_service
        .update(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success("Action item updated", item))
}

pub async fn delete_action_item_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<impl IntoResponse> {
    app_state
        .action_item_service
        .delete(&user.claims, id)
        .await?;
    Ok(ApiResponse::success_message("Action item deleted"))
}

pub async fn close_action_item_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<CloseActionItemDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let item = app_state
        .action_item_service
        .close(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success("Closure submitted", item))
}

pub async fn verify_action_item_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<VerifyActionItemDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let item = app_state
        .action_item_service
        .verify(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success("Verification recorded", item))
}

pub fn action_item_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/action-items",
            get(list_action_items_handler).post(create_action_item_handler),
        )
        .route(
            "/action-items/{id}",
            get(get_action_item_handler)
                .patch(update_action_item_handler)
                .delete(delete_action_item_handler),
        )
        .route("/action-items/{id}/close", post(close_action_item_handler))
        .route(
            "/action-items/{id}/verify",
            post(verify_action_item_handler),
        )
        .with_state(app_state)
}

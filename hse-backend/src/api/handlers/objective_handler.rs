// src/api/handlers/objective_handler.rs
use super::UuidPath;
use crate::api::dto::common::ApiResponse;
use crate::api::dto::objective_dto::{
    CreateObjectiveDto, CreateObjectiveUpdateDto, EditObjectiveUpdateDto, UpdateObjectiveDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Router,
};
use validator::Validate;

pub async fn list_objectives_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let objectives = app_state.objective_service.list(&user.claims).await?;
    Ok(ApiResponse::success("Objectives", objectives))
}

pub async fn create_objective_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateObjectiveDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let objective = app_state
        .objective_service
        .create(&user.claims, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Objective created", objective),
    ))
}

pub async fn get_objective_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<impl IntoResponse> {
    let objective = app_state.objective_service.get(&user.claims, id).await?;
    Ok(ApiResponse::success("Objective", objective))
}

pub async fn update_objective_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateObjectiveDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let objective = app_state
        .objective_service
        .update(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success("Objective updated", objective))
}

pub async fn delete_objective_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<impl IntoResponse> {
    app_state.objective_service.delete(&user.claims, id).await?;
    Ok(ApiResponse::success_message("Objective deleted"))
}

pub async fn list_updates_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(objective_id): UuidPath,
) -> AppResult<impl IntoResponse> {
    let updates = app_state
        .objective_service
        .list_updates(&user.claims, objective_id)
        .await?;
    Ok(ApiResponse::success("Progress updates", updates))
}

pub async fn create_update_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(objective_id): UuidPath,
    Json(payload): Json<CreateObjectiveUpdateDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let update = app_state
        .objective_service
        .create_update(&user.claims, objective_id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Progress update recorded", update),
    ))
}

pub async fn edit_update_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(update_id): UuidPath,
    Json(payload): Json<EditObjectiveUpdateDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let update = app_state
        .objective_service
        .edit_update(&user.claims, update_id, payload)
        .await?;

    Ok(ApiResponse::success("Progress update edited", update))
}

pub async fn delete_update_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(update_id): UuidPath,
) -> AppResult<impl IntoResponse> {
    app_state
        .objective_service
        .delete_update(&user.claims, update_id)
        .await?;
    Ok(ApiResponse::success_message("Progress update deleted"))
}

pub fn objective_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/objectives",
            get(list_objectives_handler).post(create_objective_handler),
        )
        .route(
            "/objectives/{id}",
            get(get_objective_handler)
                .patch(update_objective_handler)
                .delete(delete_objective_handler),
        )
        .route(
            "/objectives/{id}/updates",
            get(list_updates_handler).post(create_update_handler),
        )
        .route(
            "/updates/{id}",
            patch(edit_update_handler).delete(delete_update_handler),
        )
        .with_state(app_state)
}

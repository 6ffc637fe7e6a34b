// src/api/handlers/auth_handler.rs
use crate::api::dto::auth_dto::{SigninRequest, SignupRequest};
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
use tracing::info;
use validator::Validate;

pub async fn signup_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let response = app_state.auth_service.signup(payload).await?;

    info!(user_id = %response.user.id, "Signup completed");

    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Account created", response),
    ))
}

pub async fn signin_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let response = app_state.auth_service.signin(payload).await?;

    Ok(ApiResponse::success("Signed in", response))
}

pub async fn me_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let profile = app_state.auth_service.me(user.user_id()).await?;
    Ok(ApiResponse::success("Current profile", profile))
}

pub fn public_auth_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/signin", post(signin_handler))
        .with_state(app_state)
}

pub fn protected_auth_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/me", get(me_handler))
        .with_state(app_state)
}

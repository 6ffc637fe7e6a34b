// src/api/handlers/mod.rs
pub mod action_item_handler;
pub mod admin_handler;
pub mod auth_handler;
pub mod daily_work_handler;
pub mod objective_handler;
pub mod system_handler;

use crate::api::AppState;
use crate::error::AppError;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::{jwt_auth_middleware, AuthState};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

/// Path extractor that turns a malformed UUID into a validation error
/// instead of a plain 400.
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(path_str) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::ValidationErrors(vec!["Invalid path parameter".to_string()]))?;

        let uuid = Uuid::parse_str(&path_str).map_err(|_| {
            AppError::ValidationErrors(vec![format!("Invalid UUID format: '{}'", path_str)])
        })?;

        Ok(UuidPath(uuid))
    }
}

/// The full application router: public routes, then everything behind
/// the bearer-token middleware, wrapped in request logging.
pub fn app_router(app_state: AppState) -> Router {
    let auth_state = AuthState {
        jwt_manager: app_state.jwt_manager.clone(),
        profile_repo: app_state.profile_repo.clone(),
    };

    let public = Router::new()
        .merge(auth_handler::public_auth_router(app_state.clone()))
        .merge(system_handler::health_router());

    let protected = Router::new()
        .merge(auth_handler::protected_auth_router(app_state.clone()))
        .merge(objective_handler::objective_router(app_state.clone()))
        .merge(action_item_handler::action_item_router(app_state.clone()))
        .merge(daily_work_handler::daily_work_router(app_state.clone()))
        .merge(admin_handler::admin_router(app_state.clone()))
        .merge(system_handler::settings_router(app_state))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            jwt_auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

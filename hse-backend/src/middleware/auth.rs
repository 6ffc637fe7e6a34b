// src/middleware/auth.rs

use crate::domain::role::Role;
use crate::error::AppError;
use crate::repository::profile_repository::ProfileRepository;
use crate::utils::jwt::{JwtManager, UserClaims};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// State for the bearer-token middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: Arc<JwtManager>,
    pub profile_repo: Arc<ProfileRepository>,
}

/// Authenticated caller, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: UserClaims,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> uuid::Uuid {
        self.claims.user_id
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    pub fn has_at_least(&self, required: Role) -> bool {
        self.claims.has_at_least(required)
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Verifies the bearer token, re-resolves the profile so role changes
/// and bans take effect immediately, and attaches `AuthenticatedUser`.
pub async fn jwt_auth_middleware(
    State(state): State<AuthState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = extract_bearer_token(&headers).ok_or_else(|| {
        warn!(path = %path, "Missing authentication token");
        AppError::Unauthorized("Authentication required".to_string())
    })?;

    let access_claims = state.jwt_manager.verify_access_token(&token).map_err(|e| {
        warn!(path = %path, error = %e, "Invalid access token");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let profile = state
        .profile_repo
        .find_by_id(access_claims.user.user_id)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch profile during authentication");
            AppError::InternalServerError("Failed to fetch user information".to_string())
        })?
        .ok_or_else(|| {
            warn!(user_id = %access_claims.user.user_id, "Token for unknown user");
            AppError::Unauthorized("User not found".to_string())
        })?;

    if profile.is_banned(Utc::now()) {
        warn!(user_id = %profile.id, path = %path, "Request by banned account");
        return Err(AppError::Forbidden("Account is banned".to_string()));
    }

    // Claims come from the live profile, not the token payload
    let claims = UserClaims {
        user_id: profile.id,
        email: profile.email.clone(),
        full_name: profile.full_name.clone(),
        role: profile.role(),
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { claims });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_extract_bearer_token_missing_or_malformed() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), None);
    }
}

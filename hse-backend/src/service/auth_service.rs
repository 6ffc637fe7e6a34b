// src/service/auth_service.rs
use crate::api::dto::auth_dto::{AuthResponse, SigninRequest, SignupRequest};
use crate::api::dto::user_dto::ProfileDto;
use crate::domain::profile_model;
use crate::domain::role::Role;
use crate::error::{AppError, AppResult};
use crate::repository::profile_repository::ProfileRepository;
use crate::utils::jwt::{JwtManager, UserClaims};
use crate::utils::password::{PasswordError, PasswordManager};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct AuthService {
    profile_repo: Arc<ProfileRepository>,
    password_manager: Arc<PasswordManager>,
    jwt_manager: Arc<JwtManager>,
}

impl AuthService {
    pub fn new(
        profile_repo: Arc<ProfileRepository>,
        password_manager: Arc<PasswordManager>,
        jwt_manager: Arc<JwtManager>,
    ) -> Self {
        Self {
            profile_repo,
            password_manager,
            jwt_manager,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        if self
            .profile_repo
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash =
            self.password_manager
                .hash_password(&request.password)
                .map_err(|e| match e {
                    PasswordError::WeakPassword(message) => AppError::ValidationError(message),
                    other => AppError::InternalServerError(other.to_string()),
                })?;

        let profile = self
            .profile_repo
            .create(&request.email, &request.full_name, &password_hash, Role::User)
            .await?;

        info!(user_id = %profile.id, email = %profile.email, "New account registered");

        self.issue_token(profile)
    }

    pub async fn signin(&self, request: SigninRequest) -> AppResult<AuthResponse> {
        let profile = self
            .profile_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if self
            .password_manager
            .verify_password(&request.password, &profile.password_hash)
            .is_err()
        {
            warn!(email = %request.email, "Failed sign-in attempt");
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if profile.is_banned(Utc::now()) {
            warn!(user_id = %profile.id, "Sign-in attempt by banned account");
            return Err(AppError::Forbidden("Account is banned".to_string()));
        }

        info!(user_id = %profile.id, "Signed in");

        self.issue_token(profile)
    }

    pub async fn me(&self, user_id: Uuid) -> AppResult<ProfileDto> {
        let profile = self
            .profile_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        Ok(profile.into())
    }

    fn issue_token(&self, profile: profile_model::Model) -> AppResult<AuthResponse> {
        let claims = UserClaims {
            user_id: profile.id,
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role(),
        };

        let token = self
            .jwt_manager
            .generate_access_token(claims)
            .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))?;

        Ok(AuthResponse {
            token,
            user: profile.into(),
        })
    }
}

// src/api/dto/auth_dto.rs
use crate::api::dto::user_dto::ProfileDto;
use crate::utils::validation::validate_full_name;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 1, max = 255, message = "Full name must be between 1 and 255 characters"),
        custom(function = validate_full_name)
    )]
    pub full_name: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: ProfileDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_validation() {
        let valid = SignupRequest {
            email: "worker@example.com".to_string(),
            full_name: "Site Worker".to_string(),
            password: "Str0ngPassword".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignupRequest {
            email: "not-an-email".to_string(),
            full_name: "Site Worker".to_string(),
            password: "Str0ngPassword".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            email: "worker@example.com".to_string(),
            full_name: "Site Worker".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }
}

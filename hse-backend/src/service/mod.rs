// src/service/mod.rs
pub mod action_item_service;
pub mod auth_service;
pub mod backup_service;
pub mod daily_work_service;
pub mod objective_service;
pub mod settings_service;
pub mod user_service;

use crate::domain::role::Role;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::UserClaims;

/// The one authorization predicate every privileged path goes through.
pub fn require_at_least(caller: &UserClaims, required: Role) -> AppResult<()> {
    if caller.has_at_least(required) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{} access required",
            required.display_name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(role: Role) -> UserClaims {
        UserClaims {
            user_id: Uuid::new_v4(),
            email: "worker@example.com".to_string(),
            full_name: "Site Worker".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_at_least() {
        assert!(require_at_least(&claims(Role::Superadmin), Role::Superadmin).is_ok());
        assert!(require_at_least(&claims(Role::Superadmin), Role::User).is_ok());
        assert!(require_at_least(&claims(Role::Admin), Role::Admin).is_ok());
        assert!(require_at_least(&claims(Role::User), Role::Admin).is_err());
        assert!(require_at_least(&claims(Role::Admin), Role::Superadmin).is_err());
    }
}

// src/domain/role.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered permission level. Every privileged code path goes through
/// `has_at_least` instead of comparing role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    Superadmin,
}

impl Role {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            "superadmin" => Some(Self::Superadmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::User, Self::Admin, Self::Superadmin]
    }

    /// Numeric rank; higher means more privilege.
    pub fn rank(&self) -> u8 {
        match self {
            Self::User => 10,
            Self::Admin => 50,
            Self::Superadmin => 100,
        }
    }

    /// The single ordering predicate for permission checks.
    pub fn has_at_least(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    pub fn is_admin(&self) -> bool {
        self.has_at_least(Role::Admin)
    }

    pub fn is_superadmin(&self) -> bool {
        self.has_at_least(Role::Superadmin)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Administrator",
            Self::Superadmin => "Super Administrator",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid role: '{}'. Valid roles are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Role::from_str("user"), Some(Role::User));
        assert_eq!(Role::from_str("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str("superadmin"), Some(Role::Superadmin));
        assert_eq!(Role::from_str("root"), None);
    }

    #[test]
    fn test_ordering() {
        assert!(Role::Superadmin.has_at_least(Role::Admin));
        assert!(Role::Superadmin.has_at_least(Role::Superadmin));
        assert!(Role::Admin.has_at_least(Role::User));
        assert!(Role::Admin.has_at_least(Role::Admin));
        assert!(!Role::Admin.has_at_least(Role::Superadmin));
        assert!(!Role::User.has_at_least(Role::Admin));
        assert!(Role::User.has_at_least(Role::User));
    }

    #[test]
    fn test_admin_checks() {
        assert!(Role::Superadmin.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());

        assert!(Role::Superadmin.is_superadmin());
        assert!(!Role::Admin.is_superadmin());
    }

    #[test]
    fn test_serde() {
        let serialized = serde_json::to_string(&Role::Superadmin).unwrap();
        assert_eq!(serialized, r#""superadmin""#);

        let deserialized: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(deserialized, Role::Admin);
    }

    #[test]
    fn test_default() {
        assert_eq!(Role::default(), Role::User);
    }
}

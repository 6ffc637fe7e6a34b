// src/utils/password.rs

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Password verification failed")]
    VerificationFailed,

    #[error("Weak password: {0}")]
    WeakPassword(String),
}

/// Minimum requirements for new passwords.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
        }
    }
}

impl PasswordPolicy {
    pub fn check(&self, password: &str) -> Result<(), PasswordError> {
        if password.len() < self.min_length {
            return Err(PasswordError::WeakPassword(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        if password.len() > self.max_length {
            return Err(PasswordError::WeakPassword(format!(
                "Password must be at most {} characters",
                self.max_length
            )));
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordError::WeakPassword(
                "Password must contain an uppercase letter".to_string(),
            ));
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordError::WeakPassword(
                "Password must contain a lowercase letter".to_string(),
            ));
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordError::WeakPassword(
                "Password must contain a digit".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hashes and verifies passwords with Argon2id.
pub struct PasswordManager {
    policy: PasswordPolicy,
}

impl Default for PasswordManager {
    fn default() -> Self {
        Self::new(PasswordPolicy::default())
    }
}

impl PasswordManager {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Checks the policy, then hashes.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.policy.check(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingError(e.to_string()))?;

        Ok(hash.to_string())
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::HashingError(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let manager = PasswordManager::default();
        let hash = manager.hash_password("Str0ngPassword").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(manager.verify_password("Str0ngPassword", &hash).is_ok());
        assert!(manager.verify_password("WrongPassword1", &hash).is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let manager = PasswordManager::default();
        let first = manager.hash_password("Str0ngPassword").unwrap();
        let second = manager.hash_password("Str0ngPassword").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_policy_rejects_weak_passwords() {
        let manager = PasswordManager::default();

        assert!(manager.hash_password("Sh0rt").is_err());
        assert!(manager.hash_password("alllowercase1").is_err());
        assert!(manager.hash_password("ALLUPPERCASE1").is_err());
        assert!(manager.hash_password("NoDigitsHere").is_err());
    }
}

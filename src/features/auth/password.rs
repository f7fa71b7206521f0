//! Password hashing using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};

use crate::core::error::{AppError, Result};

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    /// `false` for a wrong password as well as for an unparseable hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("rahasia123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("rahasia123", &hash));
        assert!(!hasher.verify("rahasia124", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = Argon2Hasher;
        assert_ne!(
            hasher.hash("password").unwrap(),
            hasher.hash("password").unwrap()
        );
    }

    #[test]
    fn test_verify_against_garbage_hash() {
        assert!(!Argon2Hasher.verify("password", "plain-text-password"));
        assert!(!Argon2Hasher.verify("password", ""));
    }
}

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::password::PasswordHasher;
use crate::features::users::dtos::{CheckEmailInput, LoginInput, RegisterUserInput};
use crate::features::users::models::{User, DEFAULT_ROLE};
use crate::features::users::repositories::UserRepository;

/// Account management: registration, credential checks and avatar bookkeeping
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    pub async fn register_user(&self, input: RegisterUserInput) -> Result<User> {
        let email = normalize_email(&input.email);

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email has been registered".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            occupation: input.occupation.trim().to_string(),
            email,
            password_hash: self.hasher.hash(&input.password)?,
            avatar_file_name: None,
            role: DEFAULT_ROLE.to_string(),
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.save(&user).await?;
        tracing::info!("User registered: id={}", user.id);

        Ok(user)
    }

    pub async fn login(&self, input: LoginInput) -> Result<User> {
        let email = normalize_email(&input.email);

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("No user found on that email".to_string()))?;

        if !self.hasher.verify(&input.password, &user.password_hash) {
            return Err(AppError::Unauthorized("Incorrect password".to_string()));
        }

        tracing::debug!("User logged in: id={}", user.id);
        Ok(user)
    }

    pub async fn is_email_available(&self, input: CheckEmailInput) -> Result<bool> {
        let email = normalize_email(&input.email);
        Ok(self.repository.find_by_email(&email).await?.is_none())
    }

    /// Record the storage key of a freshly uploaded avatar
    pub async fn save_avatar(&self, user_id: Uuid, file_location: &str) -> Result<User> {
        let mut user = self.get_user_by_id(user_id).await?;

        user.avatar_file_name = Some(file_location.to_string());
        user.updated_at = Utc::now();

        let user = self.repository.update(&user).await?;
        tracing::info!("Avatar updated: user_id={}, key={}", user.id, file_location);

        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<User> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No user found with that ID".to_string()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::password::Argon2Hasher;
    use crate::shared::test_helpers::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(Argon2Hasher),
        )
    }

    fn register_input(email: &str) -> RegisterUserInput {
        RegisterUserInput {
            name: "  Siti Rahma ".to_string(),
            occupation: "Designer".to_string(),
            email: email.to_string(),
            password: "rahasia123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_sets_defaults() {
        let service = service();

        let user = service
            .register_user(register_input("Siti@Example.com "))
            .await
            .unwrap();

        assert_eq!(user.name, "Siti Rahma");
        assert_eq!(user.email, "siti@example.com");
        assert_eq!(user.role, DEFAULT_ROLE);
        assert_ne!(user.password_hash, "rahasia123");
        assert!(user.avatar_file_name.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = service();
        service
            .register_user(register_input("siti@example.com"))
            .await
            .unwrap();

        let err = service
            .register_user(register_input("SITI@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_checks_email_and_password() {
        let service = service();
        let registered = service
            .register_user(register_input("siti@example.com"))
            .await
            .unwrap();

        let user = service
            .login(LoginInput {
                email: "siti@example.com".to_string(),
                password: "rahasia123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, registered.id);

        let wrong_password = service
            .login(LoginInput {
                email: "siti@example.com".to_string(),
                password: "salah".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(wrong_password.public_message(), "Incorrect password");

        let unknown = service
            .login(LoginInput {
                email: "budi@example.com".to_string(),
                password: "rahasia123".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(unknown.public_message(), "No user found on that email");
    }

    #[tokio::test]
    async fn test_email_availability() {
        let service = service();
        service
            .register_user(register_input("siti@example.com"))
            .await
            .unwrap();

        let taken = service
            .is_email_available(CheckEmailInput {
                email: "Siti@Example.com".to_string(),
            })
            .await
            .unwrap();
        let free = service
            .is_email_available(CheckEmailInput {
                email: "budi@example.com".to_string(),
            })
            .await
            .unwrap();

        assert!(!taken);
        assert!(free);
    }

    #[tokio::test]
    async fn test_save_avatar() {
        let service = service();
        let user = service
            .register_user(register_input("siti@example.com"))
            .await
            .unwrap();

        let updated = service
            .save_avatar(user.id, "avatars/abc-me.png")
            .await
            .unwrap();
        assert_eq!(updated.avatar_file_name.as_deref(), Some("avatars/abc-me.png"));

        let reloaded = service.get_user_by_id(user.id).await.unwrap();
        assert_eq!(reloaded.avatar_file_name.as_deref(), Some("avatars/abc-me.png"));
    }

    #[tokio::test]
    async fn test_save_avatar_for_unknown_user() {
        let err = service()
            .save_avatar(Uuid::new_v4(), "avatars/x.png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

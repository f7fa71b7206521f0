use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::{Argon2Hasher, JwtService};
use crate::features::users::models::User;
use crate::features::users::{routes, UserRepository, UserService, UsersState};
use crate::modules::storage::LocalFileStorage;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-that-is-long-enough-for-hs256";
pub const TEST_PUBLIC_URL: &str = "http://localhost:8080/images";

/// `UserRepository` backed by a map, mirroring the Postgres constraints
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email has been registered".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user.clone())
            }
            None => Err(AppError::NotFound("No user found with that ID".to_string())),
        }
    }
}

impl InMemoryUserRepository {
    pub async fn remove(&self, id: Uuid) {
        self.users.write().await.remove(&id);
    }
}

pub fn test_jwt() -> JwtService {
    JwtService::from_secret(
        TEST_JWT_SECRET,
        Duration::from_secs(3600),
        Duration::from_secs(0),
    )
}

/// Full users router over in-memory persistence and a temp-dir file store
pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryUserRepository>,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::default());
        let storage_dir = tempfile::tempdir().unwrap();

        let users = Arc::new(UserService::new(
            repository.clone(),
            Arc::new(Argon2Hasher),
        ));
        let storage = Arc::new(LocalFileStorage::new(storage_dir.path(), TEST_PUBLIC_URL));
        let state = UsersState::new(users, Arc::new(test_jwt()), storage);

        let server = TestServer::new(routes::routes(state)).unwrap();

        Self {
            server,
            repository,
            storage_dir,
        }
    }

    /// Register an account through the API and return the `data` payload
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/api/v1/users")
            .json(&json!({
                "name": "Siti Rahma",
                "occupation": "Designer",
                "email": email,
                "password": password,
            }))
            .await;
        response.assert_status_ok();

        response.json::<Value>()["data"].clone()
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

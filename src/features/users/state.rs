use std::sync::Arc;

use crate::core::middleware::AuthState;
use crate::features::auth::JwtService;
use crate::features::users::services::UserService;
use crate::modules::storage::FileStorage;

/// Collaborators shared by the user handlers
#[derive(Clone)]
pub struct UsersState {
    pub users: Arc<UserService>,
    pub jwt: Arc<JwtService>,
    pub storage: Arc<dyn FileStorage>,
}

impl UsersState {
    pub fn new(
        users: Arc<UserService>,
        jwt: Arc<JwtService>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            users,
            jwt,
            storage,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            jwt: Arc::clone(&self.jwt),
            users: Arc::clone(&self.users),
        }
    }
}

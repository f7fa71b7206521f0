use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::users::models::User;

/// Identity attached to a request by the auth middleware
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Claims carried by the tokens minted on register/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

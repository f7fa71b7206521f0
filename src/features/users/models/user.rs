use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Role assigned to every self-registered account
pub const DEFAULT_ROLE: &str = "user";

/// Database model for a platform user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub password_hash: String,
    /// Storage key of the uploaded avatar, if any
    pub avatar_file_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

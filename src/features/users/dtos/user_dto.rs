use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::User;
use crate::modules::storage::FileStorage;
use crate::shared::validation::validate_not_blank;

/// Request DTO for account registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterUserInput {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = "validate_not_blank", message = "Occupation is required"))]
    pub occupation: String,

    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginInput {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for the email availability check
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckEmailInput {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
}

/// User payload returned by register, login and fetch
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub occupation: String,
    pub email: String,
    /// Bearer token, present on register and login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Public URL of the avatar, null until one is uploaded
    pub image_url: Option<String>,
}

impl UserResponseDto {
    pub fn format(user: &User, token: Option<String>, storage: &dyn FileStorage) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            occupation: user.occupation.clone(),
            email: user.email.clone(),
            token,
            image_url: user
                .avatar_file_name
                .as_deref()
                .map(|key| storage.public_url(key)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailAvailabilityDto {
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvatarUploadDto {
    pub is_uploaded: bool,
}

/// Avatar upload form for OpenAPI documentation
/// Note: the handler reads the multipart body directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadAvatarForm {
    /// Image file (jpeg, png, gif or webp)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub avatar: String,
}

/// Image types accepted as avatars
pub const ALLOWED_AVATAR_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum avatar size in bytes (2MB)
pub const MAX_AVATAR_SIZE: usize = 2 * 1024 * 1024;

pub fn is_avatar_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_AVATAR_MIME_TYPES.contains(&content_type)
}

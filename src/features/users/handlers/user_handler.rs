use axum::extract::{multipart::MultipartRejection, Multipart, State};
use serde_json::json;
use tracing::{debug, warn};

use crate::core::error::{ApiFailure, AppError, WithMessage};
use crate::core::extractor::ValidatedJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    is_avatar_mime_type_allowed, AvatarUploadDto, CheckEmailInput, EmailAvailabilityDto,
    LoginInput, RegisterUserInput, UploadAvatarForm, UserResponseDto, ALLOWED_AVATAR_MIME_TYPES,
    MAX_AVATAR_SIZE,
};
use crate::features::users::state::UsersState;
use crate::shared::types::ApiResponse;
use crate::shared::validation::sanitize_file_name;

const REGISTER_FAILED: &str = "Register account failed";
const LOGIN_FAILED: &str = "Login failed";
const CHECK_EMAIL_FAILED: &str = "Checking email failed";
const AVATAR_FAILED: &str = "Failed to upload avatar";

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserInput,
    responses(
        (status = 200, description = "Account has been registered", body = ApiResponse<UserResponseDto>),
        (status = 409, description = "Email has been registered"),
        (status = 422, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn register_user(
    State(state): State<UsersState>,
    payload: Result<ValidatedJson<RegisterUserInput>, AppError>,
) -> Result<ApiResponse<UserResponseDto>, ApiFailure> {
    let ValidatedJson(input) = payload.with_message(REGISTER_FAILED)?;

    let user = state
        .users
        .register_user(input)
        .await
        .with_message(REGISTER_FAILED)?;
    let token = state
        .jwt
        .generate_token(user.id)
        .with_message(REGISTER_FAILED)?;

    Ok(ApiResponse::success(
        "Account has been registered",
        UserResponseDto::format(&user, Some(token), state.storage.as_ref()),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Successfully logged in", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unknown email or incorrect password"),
        (status = 422, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<UsersState>,
    payload: Result<ValidatedJson<LoginInput>, AppError>,
) -> Result<ApiResponse<UserResponseDto>, ApiFailure> {
    let ValidatedJson(input) = payload.with_message(LOGIN_FAILED)?;

    let user = state.users.login(input).await.with_message(LOGIN_FAILED)?;
    let token = state
        .jwt
        .generate_token(user.id)
        .with_message(LOGIN_FAILED)?;

    Ok(ApiResponse::success(
        "Successfully logged in",
        UserResponseDto::format(&user, Some(token), state.storage.as_ref()),
    ))
}

/// Check whether an email address is still free
#[utoipa::path(
    post,
    path = "/api/v1/email_checkers",
    request_body = CheckEmailInput,
    responses(
        (status = 200, description = "Availability of the email", body = ApiResponse<EmailAvailabilityDto>),
        (status = 422, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn check_email_availability(
    State(state): State<UsersState>,
    payload: Result<ValidatedJson<CheckEmailInput>, AppError>,
) -> Result<ApiResponse<EmailAvailabilityDto>, ApiFailure> {
    let ValidatedJson(input) = payload.with_message(CHECK_EMAIL_FAILED)?;

    let is_available = state
        .users
        .is_email_available(input)
        .await
        .with_message(CHECK_EMAIL_FAILED)?;

    let message = if is_available {
        "Email is available"
    } else {
        "Email has been registered"
    };

    Ok(ApiResponse::success(
        message,
        EmailAvailabilityDto { is_available },
    ))
}

/// Upload an avatar for the current user
///
/// Accepts multipart/form-data with a single `avatar` image field.
#[utoipa::path(
    post,
    path = "/api/v1/avatars",
    request_body(
        content = UploadAvatarForm,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Avatar uploaded successfully", body = ApiResponse<AvatarUploadDto>),
        (status = 400, description = "Missing or invalid image"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_avatar(
    user: AuthenticatedUser,
    State(state): State<UsersState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<AvatarUploadDto>, ApiFailure> {
    let mut multipart = multipart
        .map_err(|e| AppError::BadRequest(format!("Expected multipart form data: {}", e)))
        .map_err(avatar_failure)?;

    let avatar = read_avatar(&mut multipart).await.map_err(avatar_failure)?;

    let previous_key = state
        .users
        .get_user_by_id(user.id)
        .await
        .map_err(avatar_failure)?
        .avatar_file_name;

    let key = format!(
        "avatars/{}-{}",
        user.id,
        sanitize_file_name(&avatar.file_name)
    );
    let stored_key = state
        .storage
        .upload(&key, avatar.data, &avatar.content_type)
        .await
        .map_err(avatar_failure)?;

    if let Err(e) = state.users.save_avatar(user.id, &stored_key).await {
        // Same key means the old record still points at this file
        if previous_key.as_deref() != Some(stored_key.as_str()) {
            remove_stored_file(&state, &stored_key).await;
        }
        return Err(avatar_failure(e));
    }

    if let Some(previous_key) = previous_key.filter(|k| *k != stored_key) {
        remove_stored_file(&state, &previous_key).await;
    }

    Ok(ApiResponse::success(
        "Avatar uploaded successfully",
        AvatarUploadDto { is_uploaded: true },
    ))
}

/// Get the current user
#[utoipa::path(
    get,
    path = "/api/v1/users/fetch",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn fetch_user(
    user: AuthenticatedUser,
    State(state): State<UsersState>,
) -> Result<ApiResponse<UserResponseDto>, ApiFailure> {
    let user = state
        .users
        .get_user_by_id(user.id)
        .await
        .with_message("Failed to fetch user data")?;

    Ok(ApiResponse::success(
        "Successfully fetch user data",
        UserResponseDto::format(&user, None, state.storage.as_ref()),
    ))
}

/// Best-effort cleanup; the request outcome does not depend on it
async fn remove_stored_file(state: &UsersState, key: &str) {
    if let Err(e) = state.storage.delete(key).await {
        warn!("Failed to remove stored avatar '{}': {}", key, e);
    }
}

fn avatar_failure(error: AppError) -> ApiFailure {
    ApiFailure::new(AVATAR_FAILED, error).with_data(json!({ "is_uploaded": false }))
}

struct AvatarUpload {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

async fn read_avatar(multipart: &mut Multipart) -> Result<AvatarUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some("avatar") {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "avatar".to_string());

        if !is_avatar_mime_type_allowed(&content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_AVATAR_MIME_TYPES.join(", ")
            )));
        }

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read avatar bytes: {}", e);
            AppError::BadRequest(format!("Failed to read avatar data: {}", e))
        })?;

        if data.is_empty() {
            return Err(AppError::BadRequest("Avatar file is empty".to_string()));
        }
        if data.len() > MAX_AVATAR_SIZE {
            return Err(AppError::BadRequest(format!(
                "Avatar too large. Maximum size is {} MB",
                MAX_AVATAR_SIZE / 1024 / 1024
            )));
        }

        return Ok(AvatarUpload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::BadRequest("Avatar file is required".to_string()))
}

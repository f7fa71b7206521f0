use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta, ResponseStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        users_handlers::register_user,
        users_handlers::login,
        users_handlers::check_email_availability,
        users_handlers::upload_avatar,
        users_handlers::fetch_user,
    ),
    components(
        schemas(
            // Shared
            Meta,
            ResponseStatus,
            // Users
            users_dtos::RegisterUserInput,
            users_dtos::LoginInput,
            users_dtos::CheckEmailInput,
            users_dtos::UserResponseDto,
            users_dtos::EmailAvailabilityDto,
            users_dtos::AvatarUploadDto,
            users_dtos::UploadAvatarForm,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<users_dtos::EmailAvailabilityDto>,
            ApiResponse<users_dtos::AvatarUploadDto>,
        )
    ),
    tags(
        (name = "users", description = "Account registration, login and avatars"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Crowdfunding API",
        version = "0.1.0",
        description = "User account API for the crowdfunding platform",
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme used by protected routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_account_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/users",
            "/api/v1/sessions",
            "/api/v1/email_checkers",
            "/api/v1/avatars",
            "/api/v1/users/fetch",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::ValidationErrors;

use crate::shared::types::ApiResponse;
use crate::shared::validation::format_validation_errors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(format_validation_errors(&errors))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to show to API clients
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) | AppError::Storage(_) => {
                "Server Error".to_string()
            }
        }
    }

    /// `data` payload of a failure envelope
    pub fn error_data(&self) -> Value {
        match self {
            AppError::Validation(errors) => json!({ "errors": errors }),
            other => json!({ "errors": other.public_message() }),
        }
    }

    fn log(&self) {
        match self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Storage(msg) => tracing::error!("Storage error: {}", msg),
            _ => tracing::debug!("Request rejected: {}", self),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let data = match self {
            AppError::Validation(_) => Some(self.error_data()),
            _ => None,
        };

        ApiResponse::error(self.public_message(), self.status_code(), data).into_response()
    }
}

/// An [`AppError`] annotated with the failing operation's message.
///
/// Renders as `{"meta": {"message": <message>, ...}, "data": {"errors": ...}}`.
#[derive(Debug)]
pub struct ApiFailure {
    message: String,
    error: AppError,
    data: Option<Value>,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>, error: AppError) -> Self {
        Self {
            message: message.into(),
            error,
            data: None,
        }
    }

    /// Replace the default `{"errors": ...}` payload
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    #[cfg(test)]
    pub fn error(&self) -> &AppError {
        &self.error
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        self.error.log();

        let data = self.data.unwrap_or_else(|| self.error.error_data());
        ApiResponse::error(self.message, self.error.status_code(), Some(data)).into_response()
    }
}

pub trait WithMessage<T> {
    fn with_message(self, message: &str) -> std::result::Result<T, ApiFailure>;
}

impl<T, E> WithMessage<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_message(self, message: &str) -> std::result::Result<T, ApiFailure> {
        self.map_err(|e| ApiFailure::new(message, e.into()))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Conflict("taken".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Storage("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_are_not_echoed() {
        let err = AppError::Internal("secret key missing".into());
        assert_eq!(err.public_message(), "Server Error");
        assert_eq!(err.error_data(), json!({"errors": "Server Error"}));
    }

    #[test]
    fn test_with_message_keeps_status() {
        let result: std::result::Result<(), AppError> =
            Err(AppError::Unauthorized("Incorrect password".into()));
        let failure = result.with_message("Login failed").unwrap_err();

        assert_eq!(failure.error().status_code(), StatusCode::UNAUTHORIZED);
        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

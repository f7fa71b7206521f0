use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform `{meta, data}` envelope returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub meta: Meta,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    /// Human-readable outcome of the request
    pub message: String,
    /// Mirrors the HTTP status code of the response
    pub code: u16,
    pub status: ResponseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl<T> ApiResponse<T> {
    pub fn new(
        message: impl Into<String>,
        code: StatusCode,
        status: ResponseStatus,
        data: Option<T>,
    ) -> Self {
        Self {
            meta: Meta {
                message: message.into(),
                code: code.as_u16(),
                status,
            },
            data,
        }
    }

    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self::new(message, StatusCode::OK, ResponseStatus::Success, Some(data))
    }

    pub fn error(message: impl Into<String>, code: StatusCode, data: Option<T>) -> Self {
        Self::new(message, code, ResponseStatus::Error, data)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.meta.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success("Email is available", json!({"is_available": true}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "meta": {"message": "Email is available", "code": 200, "status": "success"},
                "data": {"is_available": true}
            })
        );
    }

    #[test]
    fn test_error_envelope_without_data_serializes_null() {
        let response = ApiResponse::<()>::error("Unauthorized", StatusCode::UNAUTHORIZED, None);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["meta"]["status"], "error");
        assert_eq!(value["meta"]["code"], 401);
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_into_response_uses_meta_code() {
        let response =
            ApiResponse::error("Login failed", StatusCode::UNPROCESSABLE_ENTITY, Some(json!({})))
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

//! Unified API error type with Axum `IntoResponse` support.
//!
//! Translation failures are detected before any network call and map to
//! 400; façade error results are handled separately and map to 500 (see
//! `routes::respond`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sn_translate::TranslateError;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TranslateError> for ApiError {
    fn from(error: TranslateError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn bad_request_response() {
        let err = ApiError::BadRequest("update command names no record reference".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 400);
        assert!(json["error"].as_str().unwrap().contains("record reference"));
    }

    #[tokio::test]
    async fn internal_error_response() {
        let err = ApiError::Internal("serialization failed".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn translate_error_maps_to_bad_request() {
        let err: ApiError = TranslateError::NoRecordReference.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

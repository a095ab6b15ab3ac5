//! API route definitions and router builder.

pub mod health;
pub mod incidents;
pub mod natural;
pub mod records;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use sn_protocol::NormalizedResult;

use crate::state::AppState;

/// Render a façade result: 200 on success, 500 when the operation failed
/// downstream. The body is always the normalized result itself.
pub(crate) fn respond(result: NormalizedResult) -> Response {
    let status = if result.is_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, axum::Json(result)).into_response()
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Natural-language endpoints
        .route(
            "/search/natural-language",
            post(natural::search_natural_language),
        )
        .route(
            "/update/natural-language",
            post(natural::update_natural_language),
        )
        // Structured record endpoints
        .route("/search/records", post(records::search_records))
        .route("/records/get", post(records::get_record))
        .route("/query/perform", post(records::perform_query))
        // Incident endpoints
        .route("/incidents", get(incidents::list_incidents))
        .route("/incidents/create", post(incidents::create_incident))
        .route("/incidents/update", post(incidents::update_incident))
        .route("/incidents/{number}", get(incidents::get_incident));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use sn_transport::MockTransport;

    fn app_with(mock: Arc<MockTransport>) -> Router {
        build_router(AppState::new(mock))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app_with(Arc::new(MockTransport::new()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn root_banner() {
        let response = app_with(Arc::new(MockTransport::new()))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn natural_search_hits_transport() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_result(json!([{"number": "INC0010001"}]));

        let request = Request::post("/api/v1/search/natural-language")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({"query": "find all incidents about email"})).unwrap(),
            ))
            .unwrap();

        let response = app_with(mock.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].table, "incident");
        assert_eq!(calls[0].target, "short_descriptionLIKEemail");
    }

    #[tokio::test]
    async fn natural_update_without_reference_is_bad_request() {
        let mock = Arc::new(MockTransport::new());

        let request = Request::post("/api/v1/update/natural-language")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({"command": "close the email ticket"})).unwrap(),
            ))
            .unwrap();

        let response = app_with(mock.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn facade_error_maps_to_500() {
        let mock = Arc::new(MockTransport::new());
        mock.queue(Err(sn_transport::TransportError::NotFound(
            "record incident/ghost".into(),
        )));

        let request = Request::post("/api/v1/records/get")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({"table": "incident", "sys_id": "ghost"})).unwrap(),
            ))
            .unwrap();

        let response = app_with(mock).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().contains("not found"));
    }
}

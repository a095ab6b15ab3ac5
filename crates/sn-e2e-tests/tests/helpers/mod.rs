//! Shared test harness for E2E integration tests.
//!
//! Wires the real router, translation core, and façade over a
//! `MockTransport`, exercising the full request path without a network.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sn_rest_api::routes::build_router;
use sn_rest_api::state::AppState;
use sn_transport::{MockTransport, RecordOps};

/// End-to-end test harness: router + mock transport.
pub struct TestHarness {
    pub router: Router,
    pub transport: Arc<MockTransport>,
}

impl TestHarness {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::new());
        let router = build_router(AppState::new(transport.clone()));
        Self { router, transport }
    }

    /// Record operations over the same mock transport, for console-path
    /// assertions.
    pub fn records(&self) -> RecordOps {
        RecordOps::new(self.transport.clone())
    }

    /// POST a JSON body. Returns (status, parsed response body).
    pub async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(url)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// GET a URL. Returns (status, parsed response body).
    pub async fn get(&self, url: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(url).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }
}

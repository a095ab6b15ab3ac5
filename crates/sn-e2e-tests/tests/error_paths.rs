//! E2E tests for error paths across crate boundaries.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestHarness;

use sn_transport::TransportError;

/// A not-found fault from the transport surfaces as an error result whose
/// message names the missing record.
#[tokio::test]
async fn e2e_get_missing_record() {
    let h = TestHarness::new();
    h.transport.queue(Err(TransportError::NotFound(
        "record incident/ghost".to_string(),
    )));

    let (status, body) = h
        .post_json(
            "/api/v1/records/get",
            &json!({"table": "incident", "sys_id": "ghost"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

/// Auth failures are classified, not propagated as raw faults.
#[tokio::test]
async fn e2e_auth_failure_is_classified() {
    let h = TestHarness::new();
    h.transport
        .queue(Err(TransportError::Auth("status 401 Unauthorized".into())));

    let (status, body) = h
        .post_json(
            "/api/v1/search/natural-language",
            &json!({"query": "find all incidents about email"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("authentication failed")
    );
}

/// A body without the canonical `result` key is reported as malformed.
#[tokio::test]
async fn e2e_malformed_body_is_reported() {
    let h = TestHarness::new();
    h.transport.queue(Ok(json!({"rows": []})));

    let (status, body) = h
        .post_json(
            "/api/v1/search/records",
            &json!({"query": "email"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("malformed"));
}

/// Updating a number that doesn't exist stops after the lookup; the patch
/// is never sent.
#[tokio::test]
async fn e2e_update_of_missing_number() {
    let h = TestHarness::new();
    h.transport.queue_result(json!([]));

    let (status, body) = h
        .post_json(
            "/api/v1/update/natural-language",
            &json!({"command": "close INC0099999"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("not found"));
    assert_eq!(h.transport.call_count(), 1, "lookup only, no patch");
}

/// Network faults during a search become descriptive error results.
#[tokio::test]
async fn e2e_network_failure_is_descriptive() {
    let h = TestHarness::new();
    h.transport
        .queue(Err(TransportError::Network("connection refused".into())));

    let (status, body) = h
        .post_json(
            "/api/v1/search/records",
            &json!({"query": "email"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("connection refused")
    );
}

/// A search query containing the clause separator is rejected up front —
/// no injection into unrelated fields.
#[tokio::test]
async fn e2e_query_injection_rejected() {
    let h = TestHarness::new();

    let (status, body) = h
        .post_json(
            "/api/v1/search/records",
            &json!({"query": "email^active=false"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("reserved character"));
    assert_eq!(h.transport.call_count(), 0);
}

/// A malformed incident number in a structured update is a caller error.
#[tokio::test]
async fn e2e_bad_number_in_structured_update() {
    let h = TestHarness::new();

    let (status, _) = h
        .post_json(
            "/api/v1/incidents/update",
            &json!({"number": "not-a-number", "state": "7"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.transport.call_count(), 0);
}

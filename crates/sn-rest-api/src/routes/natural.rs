//! Natural-language endpoints.
//!
//! The only place free text enters the API; both handlers go through the
//! translation engine before anything touches the transport.

use axum::Json;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use sn_translate::{translate_search, translate_update};

use crate::error::ApiResult;
use crate::routes::respond;
use crate::state::AppState;

/// Request body for natural-language search.
#[derive(Debug, Deserialize)]
pub struct NaturalSearchRequest {
    /// Free-text query, e.g. "find all incidents about email".
    pub query: String,
}

/// POST /api/v1/search/natural-language
pub async fn search_natural_language(
    State(state): State<AppState>,
    Json(req): Json<NaturalSearchRequest>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::now_v7();
    let (table, spec) = translate_search(&req.query)?;

    tracing::info!(
        %correlation_id,
        table,
        query = %req.query,
        encoded = %spec.encode(),
        "natural-language search"
    );

    Ok(respond(state.records.search(&table, &spec).await))
}

/// Request body for natural-language update.
#[derive(Debug, Deserialize)]
pub struct NaturalUpdateRequest {
    /// Free-text command, e.g. "Update incident INC0010001 saying I'm working on it".
    pub command: String,
}

/// POST /api/v1/update/natural-language
pub async fn update_natural_language(
    State(state): State<AppState>,
    Json(req): Json<NaturalUpdateRequest>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::now_v7();
    let (record, payload) = translate_update(&req.command)?;

    tracing::info!(
        %correlation_id,
        record = %record,
        fields = payload.len(),
        "natural-language update"
    );

    Ok(respond(state.records.update(&record, &payload).await))
}

//! Incident-specific endpoints.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use serde_json::Value;

use sn_protocol::{IncidentCreate, RecordRef, UpdatePayload};
use sn_translate::TranslateError;

use crate::error::{ApiError, ApiResult};
use crate::routes::respond;
use crate::state::AppState;

const RECENT_LIMIT: u32 = 10;

/// POST /api/v1/incidents/create
pub async fn create_incident(
    State(state): State<AppState>,
    Json(incident): Json<IncidentCreate>,
) -> ApiResult<Response> {
    let fields = serde_json::to_value(&incident)
        .map_err(|e| ApiError::Internal(format!("serializing incident: {e}")))?;

    Ok(respond(state.records.create("incident", &fields).await))
}

/// Request body for a structured incident update. Field keys are
/// validated against the recognized update set; unknown keys are
/// rejected, not dropped.
#[derive(Debug, Deserialize)]
pub struct UpdateIncidentRequest {
    /// Incident number, e.g. "INC0010001".
    pub number: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// POST /api/v1/incidents/update
pub async fn update_incident(
    State(state): State<AppState>,
    Json(req): Json<UpdateIncidentRequest>,
) -> ApiResult<Response> {
    let record = RecordRef::parse(&req.number)
        .filter(|r| matches!(r, RecordRef::Number(_)))
        .ok_or_else(|| ApiError::BadRequest(format!("{:?} is not a record number", req.number)))?;

    let mut payload = UpdatePayload::new();
    for (field, value) in &req.fields {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        payload.set(field, text).map_err(TranslateError::from)?;
    }
    if payload.is_empty() {
        return Err(TranslateError::EmptyUpdate.into());
    }

    Ok(respond(state.records.update(&record, &payload).await))
}

/// GET /api/v1/incidents/{number}
pub async fn get_incident(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Response {
    respond(state.records.get_by_number("incident", &number).await)
}

/// GET /api/v1/incidents — most recent incidents.
pub async fn list_incidents(State(state): State<AppState>) -> Response {
    respond(state.records.list_recent("incident", RECENT_LIMIT).await)
}

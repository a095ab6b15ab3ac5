//! Structured record endpoints: text search, get by sys_id, raw query.

use axum::Json;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;

use sn_protocol::{DEFAULT_TABLE, FilterClause, FilterOp, QuerySpec};

use crate::error::{ApiError, ApiResult};
use crate::routes::respond;
use crate::state::AppState;

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_limit() -> u32 {
    10
}

/// Request body for text search against one table.
#[derive(Debug, Deserialize)]
pub struct SearchRecordsRequest {
    /// Text matched against short_description.
    pub query: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// POST /api/v1/search/records
pub async fn search_records(
    State(state): State<AppState>,
    Json(req): Json<SearchRecordsRequest>,
) -> ApiResult<Response> {
    let clause = FilterClause::new("short_description", FilterOp::Contains, req.query.as_str())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let spec = QuerySpec::new()
        .filter(clause)
        .with_limit(req.limit)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(respond(state.records.search(&req.table, &spec).await))
}

/// Request body for fetching a record by sys_id.
#[derive(Debug, Deserialize)]
pub struct GetRecordRequest {
    pub table: String,
    pub sys_id: String,
}

/// POST /api/v1/records/get
pub async fn get_record(
    State(state): State<AppState>,
    Json(req): Json<GetRecordRequest>,
) -> Response {
    respond(state.records.get(&req.table, &req.sys_id).await)
}

/// Request body for a raw encoded query.
#[derive(Debug, Deserialize)]
pub struct PerformQueryRequest {
    pub table: String,
    /// ServiceNow encoded query string; empty means no filter.
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// POST /api/v1/query/perform
pub async fn perform_query(
    State(state): State<AppState>,
    Json(req): Json<PerformQueryRequest>,
) -> ApiResult<Response> {
    if req.limit == 0 {
        return Err(ApiError::BadRequest("limit must be greater than zero".into()));
    }

    Ok(respond(
        state
            .records
            .perform_query(&req.table, &req.query, req.limit, req.offset, req.fields)
            .await,
    ))
}

//! Liveness endpoints.

use axum::Json;
use serde_json::{Value, json};

/// GET / — service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "snowlink-rest-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health — liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

//! The transport seam between record operations and the remote instance.

use async_trait::async_trait;
use serde_json::Value;

use sn_protocol::QuerySpec;

use crate::error::TransportResult;

/// Paging and column selection for list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
    pub fields: Option<Vec<String>>,
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            fields: None,
        }
    }

    /// Lift the paging portion out of a query spec.
    pub fn from_spec(spec: &QuerySpec) -> Self {
        Self {
            limit: spec.limit(),
            offset: spec.offset(),
            fields: spec.fields().map(<[String]>::to_vec),
        }
    }
}

/// Authenticated access to the remote Table API. One implementation per
/// process, shared read-only by every in-flight operation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Query a table with an encoded-query string. Returns the raw
    /// response body.
    async fn list(&self, table: &str, encoded_query: &str, page: &Page) -> TransportResult<Value>;

    /// Fetch a single record by sys_id.
    async fn get(&self, table: &str, sys_id: &str) -> TransportResult<Value>;

    /// Insert a record.
    async fn create(&self, table: &str, fields: &Value) -> TransportResult<Value>;

    /// Patch an existing record by sys_id.
    async fn update(&self, table: &str, sys_id: &str, fields: &Value) -> TransportResult<Value>;
}

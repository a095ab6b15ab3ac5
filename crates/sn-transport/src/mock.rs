//! Recording transport double — serves queued canned responses and logs
//! every call for count/shape assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{TransportError, TransportResult};
use crate::transport::{Page, Transport};

/// One observed transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Trait method name: "list", "get", "create", or "update".
    pub method: &'static str,
    pub table: String,
    /// Encoded query for list, sys_id for get/update, empty for create.
    pub target: String,
    /// Request body for create/update.
    pub body: Option<Value>,
}

/// A mock transport that replays queued responses in FIFO order. An empty
/// queue is a test bug and surfaces as a network error.
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<TransportResult<Value>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a raw response body or a transport failure.
    pub fn queue(&self, response: TransportResult<Value>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a successful body of the Table API shape `{"result": ...}`.
    pub fn queue_result(&self, result: Value) {
        self.queue(Ok(serde_json::json!({ "result": result })));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: &'static str, table: &str, target: &str, body: Option<&Value>) {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            table: table.to_string(),
            target: target.to_string(),
            body: body.cloned(),
        });
    }

    fn next_response(&self) -> TransportResult<Value> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no response queued".into())))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn list(&self, table: &str, encoded_query: &str, _page: &Page) -> TransportResult<Value> {
        self.record("list", table, encoded_query, None);
        self.next_response()
    }

    async fn get(&self, table: &str, sys_id: &str) -> TransportResult<Value> {
        self.record("get", table, sys_id, None);
        self.next_response()
    }

    async fn create(&self, table: &str, fields: &Value) -> TransportResult<Value> {
        self.record("create", table, "", Some(fields));
        self.next_response()
    }

    async fn update(&self, table: &str, sys_id: &str, fields: &Value) -> TransportResult<Value> {
        self.record("update", table, sys_id, Some(fields));
        self.next_response()
    }
}

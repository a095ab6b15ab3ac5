//! Record operations façade.
//!
//! Every operation delegates to the transport seam and folds the outcome
//! into a `NormalizedResult` — callers never see raw transport errors or
//! raw response bodies.

use std::sync::Arc;

use serde_json::Value;

use sn_protocol::{
    FilterClause, FilterOp, NormalizedResult, QuerySpec, RecordRef, SortDirection, UpdatePayload,
};

use crate::error::TransportError;
use crate::transport::{Page, Transport};

/// High-level record operations over a shared transport handle.
#[derive(Clone)]
pub struct RecordOps {
    transport: Arc<dyn Transport>,
}

impl RecordOps {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Run a structured query against a table.
    pub async fn search(&self, table: &str, spec: &QuerySpec) -> NormalizedResult {
        let page = Page::from_spec(spec);
        match self.transport.list(table, &spec.encode(), &page).await {
            Ok(raw) => normalize_list(raw),
            Err(error) => transport_failure("search", error),
        }
    }

    /// Fetch one record by sys_id.
    pub async fn get(&self, table: &str, sys_id: &str) -> NormalizedResult {
        match self.transport.get(table, sys_id).await {
            Ok(raw) => normalize_record(raw),
            Err(error) => transport_failure("get", error),
        }
    }

    /// Fetch one record by its human-readable number.
    pub async fn get_by_number(&self, table: &str, number: &str) -> NormalizedResult {
        match self.first_by_number(table, number).await {
            Ok(Some(row)) => NormalizedResult::record(row),
            Ok(None) => NormalizedResult::error(format!("{number} not found in {table}")),
            Err(result) => result,
        }
    }

    /// Newest records first.
    pub async fn list_recent(&self, table: &str, limit: u32) -> NormalizedResult {
        let spec = match QuerySpec::new()
            .with_limit(limit)
            .and_then(|s| s.order_by("sys_created_on", SortDirection::Descending))
        {
            Ok(spec) => spec,
            Err(error) => return NormalizedResult::error(error.to_string()),
        };
        self.search(table, &spec).await
    }

    /// Insert a record.
    pub async fn create(&self, table: &str, fields: &Value) -> NormalizedResult {
        match self.transport.create(table, fields).await {
            Ok(raw) => normalize_record(raw),
            Err(error) => transport_failure("create", error),
        }
    }

    /// Apply an update payload to the referenced record. Empty payloads
    /// are rejected before any transport call.
    pub async fn update(&self, record: &RecordRef, payload: &UpdatePayload) -> NormalizedResult {
        if payload.is_empty() {
            return NormalizedResult::error("update resolves to no actionable field changes");
        }

        let table = record.table().to_string();
        let sys_id = match record {
            RecordRef::SysId { id, .. } => id.clone(),
            RecordRef::Number(number) => match self.first_by_number(&table, number).await {
                Ok(Some(row)) => match row.get("sys_id").and_then(Value::as_str) {
                    Some(id) => id.to_string(),
                    None => {
                        return NormalizedResult::error(format!(
                            "lookup for {number} returned a record without a sys_id"
                        ));
                    }
                },
                Ok(None) => {
                    return NormalizedResult::error(format!("{number} not found in {table}"));
                }
                Err(result) => return result,
            },
        };

        match self
            .transport
            .update(&table, &sys_id, &payload.to_json())
            .await
        {
            Ok(raw) => normalize_record(raw),
            Err(error) => transport_failure("update", error),
        }
    }

    /// Pass-through structured query with a raw encoded string.
    pub async fn perform_query(
        &self,
        table: &str,
        encoded_query: &str,
        limit: u32,
        offset: u32,
        fields: Option<Vec<String>>,
    ) -> NormalizedResult {
        if limit == 0 {
            return NormalizedResult::error("limit must be greater than zero");
        }
        let page = Page {
            limit,
            offset,
            fields,
        };
        match self.transport.list(table, encoded_query, &page).await {
            Ok(raw) => normalize_list(raw),
            Err(error) => transport_failure("query", error),
        }
    }

    /// First row matching `number=<number>`, or None when the query comes
    /// back empty. Errors arrive pre-normalized.
    async fn first_by_number(
        &self,
        table: &str,
        number: &str,
    ) -> Result<Option<Value>, NormalizedResult> {
        let clause = FilterClause::new("number", FilterOp::Equals, number)
            .map_err(|e| NormalizedResult::error(format!("invalid record number: {e}")))?;
        let spec = QuerySpec::new()
            .filter(clause)
            .with_limit(1)
            .map_err(|e| NormalizedResult::error(e.to_string()))?;

        let raw = self
            .transport
            .list(table, &spec.encode(), &Page::from_spec(&spec))
            .await
            .map_err(|error| transport_failure("lookup", error))?;

        match raw.get("result") {
            Some(Value::Array(rows)) => Ok(rows.first().cloned()),
            _ => Err(NormalizedResult::error(
                "malformed response: expected a record list under 'result'",
            )),
        }
    }
}

fn transport_failure(operation: &str, error: TransportError) -> NormalizedResult {
    tracing::warn!(operation, %error, "transport call failed");
    NormalizedResult::error(error.to_string())
}

/// Wrap a `{"result": [...]}` body as a record-list result.
fn normalize_list(raw: Value) -> NormalizedResult {
    match raw.get("result") {
        Some(Value::Array(rows)) => NormalizedResult::records(rows.clone()),
        Some(other) => NormalizedResult::error(format!(
            "malformed response: expected a record list under 'result', got {other}"
        )),
        None => NormalizedResult::error("malformed response: missing 'result' key"),
    }
}

/// Wrap a `{"result": {...}}` body as a single-record result.
fn normalize_record(raw: Value) -> NormalizedResult {
    match raw.get("result") {
        Some(row @ Value::Object(_)) => NormalizedResult::record(row.clone()),
        Some(other) => NormalizedResult::error(format!(
            "malformed response: expected a single record under 'result', got {other}"
        )),
        None => NormalizedResult::error("malformed response: missing 'result' key"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use sn_protocol::ResultStatus;

    use crate::mock::MockTransport;

    fn ops() -> (Arc<MockTransport>, RecordOps) {
        let mock = Arc::new(MockTransport::new());
        let ops = RecordOps::new(mock.clone());
        (mock, ops)
    }

    fn spec_for(term: &str) -> QuerySpec {
        QuerySpec::new().filter(
            FilterClause::new("short_description", FilterOp::Contains, term).unwrap(),
        )
    }

    #[tokio::test]
    async fn search_normalizes_record_list() {
        let (mock, ops) = ops();
        mock.queue_result(json!([
            {"number": "INC0010001", "short_description": "Email down"},
            {"number": "INC0010002", "short_description": "Email slow"},
        ]));

        let result = ops.search("incident", &spec_for("email")).await;
        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(result.data.as_ref().unwrap().as_array().unwrap().len(), 2);

        let calls = mock.calls();
        assert_eq!(calls[0].target, "short_descriptionLIKEemail");
    }

    #[tokio::test]
    async fn empty_payload_rejected_without_transport_call() {
        let (mock, ops) = ops();
        let record = RecordRef::Number("INC0010001".to_string());
        let payload = UpdatePayload::new();

        let result = ops.update(&record, &payload).await;
        assert!(result.is_error());
        assert_eq!(mock.call_count(), 0, "no network round trip for a no-op");
    }

    #[tokio::test]
    async fn number_update_resolves_sys_id_then_patches() {
        let (mock, ops) = ops();
        mock.queue_result(json!([{"sys_id": "abc123", "number": "INC0010001"}]));
        mock.queue_result(json!({"sys_id": "abc123", "state": "7"}));

        let record = RecordRef::Number("INC0010001".to_string());
        let payload = UpdatePayload::from_pairs([("state", "7")]).unwrap();

        let result = ops.update(&record, &payload).await;
        assert_eq!(result.status, ResultStatus::Success);

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, "list");
        assert_eq!(calls[0].target, "number=INC0010001");
        assert_eq!(calls[1].method, "update");
        assert_eq!(calls[1].target, "abc123");
        assert_eq!(calls[1].body, Some(json!({"state": "7"})));
    }

    #[tokio::test]
    async fn sys_id_update_skips_lookup() {
        let (mock, ops) = ops();
        mock.queue_result(json!({"sys_id": "abc123", "work_notes": "done"}));

        let record = RecordRef::SysId {
            table: "incident".to_string(),
            id: "abc123".to_string(),
        };
        let payload = UpdatePayload::from_pairs([("work_notes", "done")]).unwrap();

        let result = ops.update(&record, &payload).await;
        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_number_is_not_found() {
        let (mock, ops) = ops();
        mock.queue_result(json!([]));

        let record = RecordRef::Number("INC0099999".to_string());
        let payload = UpdatePayload::from_pairs([("state", "7")]).unwrap();

        let result = ops.update(&record, &payload).await;
        assert!(result.is_error());
        assert!(result.message.as_ref().unwrap().contains("not found"));
        assert_eq!(mock.call_count(), 1, "no patch after a failed lookup");
    }

    #[tokio::test]
    async fn get_not_found_becomes_error_result() {
        let (mock, ops) = ops();
        mock.queue(Err(TransportError::NotFound(
            "record incident/ghost".to_string(),
        )));

        let result = ops.get("incident", "ghost").await;
        assert!(result.is_error());
        assert!(result.message.as_ref().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn auth_failure_becomes_error_result() {
        let (mock, ops) = ops();
        mock.queue(Err(TransportError::Auth("status 401".to_string())));

        let result = ops.search("incident", &spec_for("email")).await;
        assert!(result.is_error());
        assert!(result.message.as_ref().unwrap().contains("authentication"));
    }

    #[tokio::test]
    async fn missing_result_key_is_malformed() {
        let (mock, ops) = ops();
        mock.queue(Ok(json!({"unexpected": true})));

        let result = ops.search("incident", &spec_for("email")).await;
        assert!(result.is_error());
        assert!(result.message.as_ref().unwrap().contains("malformed"));
    }

    #[tokio::test]
    async fn scalar_result_for_list_is_malformed() {
        let (mock, ops) = ops();
        mock.queue(Ok(json!({"result": "oops"})));

        let result = ops.search("incident", &spec_for("email")).await;
        assert!(result.is_error());
    }

    #[tokio::test]
    async fn get_by_number_returns_first_row() {
        let (mock, ops) = ops();
        mock.queue_result(json!([{"sys_id": "abc", "number": "INC0010001"}]));

        let result = ops.get_by_number("incident", "INC0010001").await;
        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(result.data.as_ref().unwrap()["number"], "INC0010001");
    }

    #[tokio::test]
    async fn get_by_number_missing_is_not_found() {
        let (mock, ops) = ops();
        mock.queue_result(json!([]));

        let result = ops.get_by_number("incident", "INC0099999").await;
        assert!(result.is_error());
        assert!(result.message.as_ref().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn create_normalizes_single_record() {
        let (mock, ops) = ops();
        mock.queue_result(json!({"sys_id": "new1", "number": "INC0010042"}));

        let fields = json!({"short_description": "Email down", "description": "d"});
        let result = ops.create("incident", &fields).await;
        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(result.data.as_ref().unwrap()["number"], "INC0010042");

        let calls = mock.calls();
        assert_eq!(calls[0].method, "create");
        assert_eq!(calls[0].body, Some(fields));
    }

    #[tokio::test]
    async fn list_recent_orders_by_created_desc() {
        let (mock, ops) = ops();
        mock.queue_result(json!([]));

        let result = ops.list_recent("incident", 10).await;
        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(mock.calls()[0].target, "ORDERBYDESCsys_created_on");
    }

    #[tokio::test]
    async fn list_recent_zero_limit_is_error_without_call() {
        let (mock, ops) = ops();
        let result = ops.list_recent("incident", 0).await;
        assert!(result.is_error());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn perform_query_passes_raw_string() {
        let (mock, ops) = ops();
        mock.queue_result(json!([]));

        let result = ops
            .perform_query("incident", "state=1^active=true", 25, 50, None)
            .await;
        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(mock.calls()[0].target, "state=1^active=true");
    }

    #[tokio::test]
    async fn perform_query_zero_limit_rejected() {
        let (mock, ops) = ops();
        let result = ops.perform_query("incident", "", 0, 0, None).await;
        assert!(result.is_error());
        assert_eq!(mock.call_count(), 0);
    }
}

//! The one result shape every record operation returns.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Canonical operation outcome: a record list, a single record, or an
/// error with a descriptive message. `data` and `message` are omitted
/// from the wire form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub status: ResultStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NormalizedResult {
    /// Successful list result.
    pub fn records(rows: Vec<serde_json::Value>) -> Self {
        Self {
            status: ResultStatus::Success,
            data: Some(serde_json::Value::Array(rows)),
            message: None,
        }
    }

    /// Successful single-record result.
    pub fn record(row: serde_json::Value) -> Self {
        Self {
            status: ResultStatus::Success,
            data: Some(row),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ResultStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_wrap_as_array() {
        let result = NormalizedResult::records(vec![json!({"number": "INC0010001"})]);
        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(result.data.as_ref().unwrap().as_array().unwrap().len(), 1);
        assert!(!result.is_error());
    }

    #[test]
    fn error_carries_message_and_no_data() {
        let result = NormalizedResult::error("record not found");
        assert!(result.is_error());
        assert_eq!(result.message.as_deref(), Some("record not found"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "record not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn success_omits_message() {
        let json = serde_json::to_value(NormalizedResult::record(json!({"a": 1}))).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("message").is_none());
    }
}

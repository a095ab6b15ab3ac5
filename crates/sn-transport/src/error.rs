//! Transport error types.

use thiserror::Error;

/// Failures from the ServiceNow REST transport. Not retried at this
/// layer; the façade folds them into error results.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Convenience alias for transport results.
pub type TransportResult<T> = Result<T, TransportError>;

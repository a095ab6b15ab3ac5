//! Translation error taxonomy.
//!
//! Every variant is detected before any network call and is recoverable:
//! callers turn these into error results, never crashes.

use thiserror::Error;

use sn_protocol::{QueryError, UnknownField};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("could not determine an intent from {0:?}")]
    ClassificationAmbiguous(String),

    #[error("update command names no record reference")]
    NoRecordReference,

    #[error("update resolves to no actionable field changes")]
    EmptyUpdate,

    #[error(transparent)]
    UnknownField(#[from] UnknownField),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Convenience alias for translation results.
pub type TranslateResult<T> = Result<T, TranslateError>;

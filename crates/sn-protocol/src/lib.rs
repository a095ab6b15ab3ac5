//! Shared types for SnowLink (API server + console).
//!
//! Holds the query model and its encoded-query rendering, record
//! identity (ticket numbers, sys_ids, tables, state codes), the `Intent`
//! variants produced by translation, and the `NormalizedResult` shape
//! every operation returns.

pub mod intent;
pub mod query;
pub mod record;
pub mod result;

// Re-export key types for convenience
pub use intent::{Intent, UnknownField, UpdatePayload};
pub use query::{FilterClause, FilterOp, FilterValue, QueryError, QuerySpec, SortDirection};
pub use record::{DEFAULT_TABLE, IncidentCreate, IncidentState, RecordRef};
pub use result::{NormalizedResult, ResultStatus};

//! Shared application state for the Axum server.

use std::sync::Arc;

use sn_transport::{RecordOps, Transport};

/// Shared application state; cheap to clone into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Record operations over the process-wide transport handle.
    pub records: RecordOps,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            records: RecordOps::new(transport),
        }
    }
}

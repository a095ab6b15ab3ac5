//! ServiceNow REST transport for SnowLink.
//!
//! Provides the `Transport` trait seam, the production `ServiceNowClient`
//! (reqwest against the Table API), credential strategies, environment
//! configuration, a recording `MockTransport` double, and the `RecordOps`
//! façade that normalizes every outcome into a `NormalizedResult`.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod facade;
pub mod mock;
pub mod transport;

// Re-export key types for convenience
pub use auth::{AuthHeader, Credentials};
pub use client::ServiceNowClient;
pub use config::InstanceConfig;
pub use error::{TransportError, TransportResult};
pub use facade::RecordOps;
pub use mock::{MockTransport, RecordedCall};
pub use transport::{Page, Transport};

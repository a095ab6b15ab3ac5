//! SnowLink interactive console.
//!
//! Reads natural-language commands from stdin and runs them through the
//! same translation core and façade as the REST API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sn_console::repl;
use sn_transport::{InstanceConfig, RecordOps, ServiceNowClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Plain (non-JSON) log output so diagnostics don't interleave with
    // printed results; silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sn-console starting");

    let instance = InstanceConfig::from_env()?;
    let transport = ServiceNowClient::connect(instance).await?;
    let records = RecordOps::new(Arc::new(transport));

    repl::run(&records).await
}

//! SnowLink REST API server.
//!
//! Wires the translation core and the ServiceNow transport behind the
//! HTTP front end used by operators and automated assistants.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use sn_rest_api::config::ApiConfig;
use sn_rest_api::routes;
use sn_rest_api::state::AppState;
use sn_transport::{InstanceConfig, ServiceNowClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sn-rest-api starting");

    let config = ApiConfig::from_env();

    // The process-wide transport handle: built once, immutable afterwards,
    // shared by every in-flight request.
    let instance = InstanceConfig::from_env()?;
    let transport = ServiceNowClient::connect(instance).await?;
    let state = AppState::new(Arc::new(transport));

    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}

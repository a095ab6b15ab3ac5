//! API server configuration.

/// Listen address configuration. ServiceNow connection settings live in
/// `sn_transport::InstanceConfig`.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    pub host: String,
    /// Listen port.
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const DEFAULT_PORT: u16 = 8000;

impl ApiConfig {
    /// Load from `HOST`/`PORT` environment variables, defaulting to
    /// 0.0.0.0:8000.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { host, port }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
        }
    }
}

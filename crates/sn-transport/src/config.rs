//! Connection configuration from the environment.
//!
//! Strategy selection order matches the deployment convention: a token
//! wins, then the four OAuth variables, then basic username/password.

use anyhow::bail;

use crate::auth::Credentials;

/// Instance URL plus the active credential strategy. Built once at
/// process start.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub instance_url: String,
    pub credentials: Credentials,
}

impl InstanceConfig {
    /// Load from `SERVICENOW_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let Some(instance_url) = get("SERVICENOW_INSTANCE_URL") else {
            bail!("SERVICENOW_INSTANCE_URL is required");
        };

        let credentials = if let Some(token) = get("SERVICENOW_TOKEN") {
            Credentials::Token(token)
        } else if let (Some(client_id), Some(client_secret), Some(username), Some(password)) = (
            get("SERVICENOW_CLIENT_ID"),
            get("SERVICENOW_CLIENT_SECRET"),
            get("SERVICENOW_USERNAME"),
            get("SERVICENOW_PASSWORD"),
        ) {
            Credentials::OAuth {
                client_id,
                client_secret,
                username,
                password,
            }
        } else if let (Some(username), Some(password)) =
            (get("SERVICENOW_USERNAME"), get("SERVICENOW_PASSWORD"))
        {
            Credentials::Basic { username, password }
        } else {
            bail!(
                "authentication credentials required: set SERVICENOW_TOKEN, \
                 the SERVICENOW_CLIENT_ID/SECRET + USERNAME/PASSWORD group, \
                 or SERVICENOW_USERNAME/SERVICENOW_PASSWORD"
            );
        };

        Ok(Self {
            instance_url: instance_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }
}

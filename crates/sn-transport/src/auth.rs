//! Credential strategies and their resolution into request headers.
//!
//! Exactly one strategy is active per process. OAuth resolves a bearer
//! token once at startup via the password grant; the resulting header is
//! immutable for the life of the process.

use serde::Deserialize;

use crate::error::{TransportError, TransportResult};

/// How the process authenticates against the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Pre-issued API token, sent as a bearer header.
    Token(String),
    /// OAuth password grant against `{instance}/oauth_token.do`.
    OAuth {
        client_id: String,
        client_secret: String,
        username: String,
        password: String,
    },
    /// HTTP basic auth.
    Basic { username: String, password: String },
}

/// Resolved per-request authentication.
#[derive(Debug, Clone)]
pub enum AuthHeader {
    Basic { username: String, password: String },
    Bearer(String),
}

#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

impl Credentials {
    /// Resolve into a request header, performing the OAuth token exchange
    /// when needed.
    // TODO: re-run the password grant when the access token expires.
    pub async fn resolve(
        self,
        http: &reqwest::Client,
        instance_url: &str,
    ) -> TransportResult<AuthHeader> {
        match self {
            Self::Token(token) => Ok(AuthHeader::Bearer(token)),
            Self::Basic { username, password } => Ok(AuthHeader::Basic { username, password }),
            Self::OAuth {
                client_id,
                client_secret,
                username,
                password,
            } => {
                let url = format!("{instance_url}/oauth_token.do");
                let params = [
                    ("grant_type", "password"),
                    ("client_id", client_id.as_str()),
                    ("client_secret", client_secret.as_str()),
                    ("username", username.as_str()),
                    ("password", password.as_str()),
                ];

                let response = http
                    .post(&url)
                    .form(&params)
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(TransportError::Auth(format!(
                        "token endpoint returned {status}"
                    )));
                }

                let token: OAuthTokenResponse = response
                    .json()
                    .await
                    .map_err(|e| TransportError::Malformed(e.to_string()))?;

                tracing::info!("oauth access token resolved");
                Ok(AuthHeader::Bearer(token.access_token))
            }
        }
    }
}

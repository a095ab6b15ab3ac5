//! Production Table API client.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::auth::AuthHeader;
use crate::config::InstanceConfig;
use crate::error::{TransportError, TransportResult};
use crate::transport::{Page, Transport};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Authenticated reqwest client for `/api/now/table`. Built once at
/// startup, immutable afterwards, safe to share across in-flight
/// requests.
pub struct ServiceNowClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthHeader,
}

impl ServiceNowClient {
    /// Build the client and resolve credentials (OAuth token exchange
    /// happens here, once).
    pub async fn connect(config: InstanceConfig) -> TransportResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let auth = config
            .credentials
            .resolve(&http, &config.instance_url)
            .await?;

        tracing::info!(instance = %config.instance_url, "servicenow transport ready");
        Ok(Self {
            http,
            base_url: config.instance_url,
            auth,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/api/now/table/{table}", self.base_url)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.auth {
            AuthHeader::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            AuthHeader::Bearer(token) => builder.bearer_auth(token),
        }
    }

    async fn dispatch(&self, builder: RequestBuilder, context: String) -> TransportResult<Value> {
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TransportError::Auth(format!("{context}: status {status}")));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound(context));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl Transport for ServiceNowClient {
    async fn list(&self, table: &str, encoded_query: &str, page: &Page) -> TransportResult<Value> {
        let mut request = self.request(Method::GET, self.table_url(table)).query(&[
            ("sysparm_limit", page.limit.to_string()),
            ("sysparm_offset", page.offset.to_string()),
        ]);
        if !encoded_query.is_empty() {
            request = request.query(&[("sysparm_query", encoded_query)]);
        }
        if let Some(fields) = &page.fields {
            request = request.query(&[("sysparm_fields", fields.join(","))]);
        }
        self.dispatch(request, format!("query on {table}")).await
    }

    async fn get(&self, table: &str, sys_id: &str) -> TransportResult<Value> {
        let url = format!("{}/{sys_id}", self.table_url(table));
        let request = self.request(Method::GET, url);
        self.dispatch(request, format!("record {table}/{sys_id}"))
            .await
    }

    async fn create(&self, table: &str, fields: &Value) -> TransportResult<Value> {
        let request = self
            .request(Method::POST, self.table_url(table))
            .json(fields);
        self.dispatch(request, format!("create in {table}")).await
    }

    async fn update(&self, table: &str, sys_id: &str, fields: &Value) -> TransportResult<Value> {
        let url = format!("{}/{sys_id}", self.table_url(table));
        let request = self.request(Method::PATCH, url).json(fields);
        self.dispatch(request, format!("record {table}/{sys_id}"))
            .await
    }
}

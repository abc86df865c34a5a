//! HTTP transport for GraphQL requests.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RemoteError, Result};
use crate::settings::RemoteSettings;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("metadata-schema-duplicator/", env!("CARGO_PKG_VERSION"));

/// A GraphQL operation ready to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    /// Operation name, used for logging and server-side tracing.
    pub operation_name: &'static str,
    /// GraphQL document.
    pub query: &'static str,
    /// Operation variables.
    pub variables: Value,
}

impl GraphQlRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(operation_name: &'static str, query: &'static str, variables: Value) -> Self {
        Self {
            operation_name,
            query,
            variables,
        }
    }
}

/// Sends GraphQL requests and returns the `data` member of the response.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Executes `request`. GraphQL `errors` are reported as
    /// [`RemoteError::GraphQl`].
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Unwraps a GraphQL response envelope.
///
/// Any entry in `errors` fails the whole call, even when partial data is
/// present.
pub(crate) fn unwrap_envelope(body: Value) -> Result<Value> {
    let envelope: Envelope = serde_json::from_value(body)?;
    if !envelope.errors.is_empty() {
        return Err(RemoteError::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    match envelope.data {
        Some(Value::Null) | None => Err(RemoteError::MissingData),
        Some(data) => Ok(data),
    }
}

/// GraphQL client over HTTPS.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Creates a client for the configured endpoint.
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        settings.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = match &settings.user_agent {
            Some(agent) => HeaderValue::from_str(agent)
                .map_err(|e| RemoteError::Config(format!("invalid user agent: {e}")))?,
            None => HeaderValue::from_static(USER_AGENT_VALUE),
        };
        headers.insert(USER_AGENT, user_agent);

        if let Some(token) = &settings.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| RemoteError::Config(format!("invalid token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            tracing::warn!("No API token configured, requests will be anonymous");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim().to_string(),
        })
    }

    /// The endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlTransport for GraphQlClient {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value> {
        tracing::debug!(
            operation = request.operation_name,
            endpoint = %self.endpoint,
            "Sending GraphQL request"
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::status(status.as_u16(), &body));
        }

        let body: Value = response.json().await?;
        unwrap_envelope(body)
    }
}

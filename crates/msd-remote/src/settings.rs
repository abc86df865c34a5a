//! Connection settings for the metadata service.

use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, Result};

/// Environment variable holding the API access token.
pub const TOKEN_ENV_VAR: &str = "MSD_API_TOKEN";

/// Libraries requested per page when listing collections.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Where and how to reach the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Full GraphQL endpoint URL.
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token. Prefer [`TOKEN_ENV_VAR`] over storing it on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Libraries requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Overrides the default `User-Agent` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: None,
        }
    }
}

impl RemoteSettings {
    /// Settings for `endpoint` with defaults for everything else.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Takes the token from [`TOKEN_ENV_VAR`] when it is set and non-empty.
    #[must_use]
    pub fn with_token_from_env(mut self) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
            && !token.trim().is_empty()
        {
            self.token = Some(token.trim().to_string());
        }
        self
    }

    /// Checks that the settings can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(RemoteError::Config("endpoint is not set".to_string()));
        }
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(RemoteError::Config(format!(
                "endpoint must be an http(s) URL: {endpoint}"
            )));
        }
        if self.page_size == 0 {
            return Err(RemoteError::Config("page_size must be positive".to_string()));
        }
        Ok(())
    }
}

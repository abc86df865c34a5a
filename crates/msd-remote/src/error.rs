//! Error types for the GraphQL repository.

use thiserror::Error;

use msd_core::ApiError;

/// Maximum number of response body bytes kept in an error.
const MAX_BODY_LEN: usize = 512;

/// Errors raised while talking to the metadata service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    /// The repository settings are unusable.
    #[error("invalid remote configuration: {0}")]
    Config(String),

    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response carried GraphQL errors.
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Failed to parse JSON response.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The response had neither data nor errors.
    #[error("response contained no data")]
    MissingData,

    /// The addressed object does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl RemoteError {
    /// Builds a status error, truncating long bodies.
    pub fn status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_LEN) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Self::Status { status, body }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Network(message) | RemoteError::Config(message) => Self::Network(message),
            RemoteError::Status { status, body } => Self::Status { status, body },
            RemoteError::GraphQl(messages) => Self::Rejected(messages),
            RemoteError::JsonParse(message) => Self::Decode(message),
            RemoteError::MissingData => Self::Decode("response contained no data".to_string()),
            RemoteError::NotFound(what) => Self::NotFound(what),
        }
    }
}

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

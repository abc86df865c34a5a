//! Error types for selection, planning and plan execution.

use thiserror::Error;

use crate::types::{AppliedAction, ApplyAction};

/// A remote metadata service call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The service rejected the request (duplicate constraint, malformed input, ...).
    #[error("request rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The addressed collection or field does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Returns a user-friendly error message suitable for a failure dialog.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => {
                "Could not reach the metadata service. Please check your connection."
            }
            Self::Status { status, .. } if *status == 401 || *status == 403 => {
                "The metadata service refused the request. Please check your access token."
            }
            Self::Rejected(_) => "The metadata service rejected one of the changes.",
            Self::NotFound(_) => "The library could not be found.",
            Self::Status { .. } | Self::Decode(_) => "An unexpected error occurred.",
        }
    }
}

/// The selection references something the source catalog does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A selected field id is not part of the catalog.
    #[error("selected field {0} is not in the source catalog")]
    UnknownField(String),
}

/// Plan execution stopped at a failing action.
///
/// Actions before the failing one were applied and are not rolled back.
#[derive(Debug, Clone, Error)]
#[error("failed to apply {failed_action} after {} applied action(s): {error}", applied.len())]
pub struct ExecutionFailure {
    /// The remote error that aborted the run.
    #[source]
    pub error: ApiError,
    /// The action whose remote call failed.
    pub failed_action: ApplyAction,
    /// Actions that completed before the failure, in plan order.
    pub applied: Vec<AppliedAction>,
}

/// Errors surfaced by [`apply_selection`](crate::apply_selection).
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Choice-typed fields were selected without any option.
    #[error("the following fields have no options selected: {}", field_names.join(", "))]
    Validation {
        /// Names of every offending field, in selection order.
        field_names: Vec<String>,
    },

    /// The selection does not match the source catalog.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Reading the destination's current fields failed.
    #[error("failed to read destination fields: {0}")]
    Snapshot(#[source] ApiError),

    /// A remote call failed mid-run.
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
}

/// Result type alias for apply operations.
pub type Result<T> = std::result::Result<T, ApplyError>;

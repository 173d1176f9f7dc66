//! API error handling.
//!
//! Every failure a request can hit is an [`ApiError`]. The variant decides
//! the status code; the message is only ever logged and never sent to the
//! client.

use axum::http::StatusCode;
use thiserror::Error;

use crate::infrastructure::StoreError;

/// Errors raised while serving a to-do request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed identifier, malformed body or missing query flag.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Identifier out of range or unknown path.
    #[error("not found: {0}")]
    NotFound(String),

    /// The method is not served on this path.
    #[error("Method not supported")]
    MethodNotSupported,

    /// Loading or saving the list failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The response envelope could not be encoded.
    #[error("response serialization failed: {0}")]
    ResponseSerialization(#[source] serde_json::Error),

    /// The task serving the request panicked or was cancelled.
    #[error("request task aborted: {0}")]
    Aborted(#[source] tokio::task::JoinError),
}

impl ApiError {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidData(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Storage(StoreError::ItemDoesNotExist(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage(_) | Self::ResponseSerialization(_) | Self::Aborted(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

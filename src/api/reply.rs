//! Response formatting.
//!
//! Every reply sets a content type, a status and a body. Error replies log
//! the request and the detailed message, then send the client only the
//! standard reason phrase for the status.

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::dto::TodoResponse;
use super::error::ApiError;

const TEXT_PLAIN: &str = "text/plain";
const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// Method and URL of the request being answered, kept for error logging.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
}

impl RequestContext {
    #[must_use]
    pub const fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }
}

/// Plain-text reply.
pub fn text(status: StatusCode, content: impl Into<String>) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN))],
        content.into(),
    )
        .into_response()
}

/// JSON reply carrying a response envelope.
///
/// # Errors
///
/// Returns [`ApiError::ResponseSerialization`] if the envelope cannot be
/// encoded.
pub fn json(status: StatusCode, envelope: &TodoResponse<'_>) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(envelope).map_err(ApiError::ResponseSerialization)?;
    Ok((
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))],
        Body::from(body),
    )
        .into_response())
}

/// Logs `error` and replies with the reason phrase of its status.
pub fn error(context: &RequestContext, error: &ApiError) -> Response {
    let status = error.status();
    tracing::error!(
        url = %context.uri,
        method = %context.method,
        status = status.as_u16(),
        message = %error,
        "Request failed"
    );

    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    (
        status,
        [
            (CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8)),
            (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        ],
        format!("{reason}\n"),
    )
        .into_response()
}

//! HTTP handlers for the to-do list.
//!
//! Item handlers receive an identifier that has already been validated
//! against the session's list. Mutating handlers persist the whole list
//! before replying.

use axum::extract::Query;
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;

use super::dto::{AddItemRequest, TodoResponse};
use super::error::ApiError;
use super::reply::{self, RequestContext};
use crate::domain::TodoList;
use crate::infrastructure::{ListSession, SharedTodoList, StoreError};

const ROOT_CONTENT: &str = "There's an API here";
const COMPLETE_PARAM: &str = "complete";

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The guarded to-do list every `/todo` request goes through.
    pub todo_list: SharedTodoList,
}

impl AppState {
    #[must_use]
    pub const fn new(todo_list: SharedTodoList) -> Self {
        Self { todo_list }
    }
}

// =============================================================================
// Collection Handlers
// =============================================================================

/// `GET /todo`: every item, status 200.
///
/// # Errors
///
/// Returns [`ApiError::ResponseSerialization`] if the envelope cannot be encoded.
pub fn list_all(list: &TodoList) -> Result<Response, ApiError> {
    reply::json(StatusCode::OK, &TodoResponse::new(list.items()))
}

/// `POST /todo`: appends a new item from a `{"task": "..."}` body, status 201.
///
/// # Errors
///
/// - [`ApiError::InvalidData`] if the body is not a JSON object with a
///   string `task` field.
/// - [`ApiError::Storage`] if the save fails.
pub async fn add(session: &mut ListSession<'_>, body: &[u8]) -> Result<Response, ApiError> {
    let request: AddItemRequest = serde_json::from_slice(body)
        .map_err(|error| ApiError::InvalidData(format!("Invalid JSON: {error}")))?;

    session.list_mut().add(request.task);
    session.commit().await?;

    Ok(reply::text(StatusCode::CREATED, ""))
}

// =============================================================================
// Item Handlers
// =============================================================================

/// `GET /todo/{id}`: a one-item envelope, status 200.
///
/// # Errors
///
/// Returns [`ApiError::ResponseSerialization`] if the envelope cannot be encoded.
pub fn get_one(list: &TodoList, id: usize) -> Result<Response, ApiError> {
    reply::json(StatusCode::OK, &TodoResponse::new(list.slice_one(id)))
}

/// `DELETE /todo/{id}`: removes the item, status 204.
///
/// # Errors
///
/// Returns [`ApiError::Storage`] if the removal or the save fails.
pub async fn delete(session: &mut ListSession<'_>, id: usize) -> Result<Response, ApiError> {
    session.list_mut().delete(id).map_err(StoreError::from)?;
    session.commit().await?;

    Ok(reply::text(StatusCode::NO_CONTENT, ""))
}

/// `PATCH /todo/{id}?complete`: marks the item done, status 204.
///
/// The `complete` query parameter must be present; its value is ignored.
///
/// # Errors
///
/// - [`ApiError::InvalidData`] if the `complete` parameter is missing. The
///   list is left untouched.
/// - [`ApiError::Storage`] if the update or the save fails.
pub async fn complete(
    session: &mut ListSession<'_>,
    uri: &Uri,
    id: usize,
) -> Result<Response, ApiError> {
    if !has_query_param(uri, COMPLETE_PARAM)? {
        return Err(ApiError::InvalidData(format!(
            "Missing query param '{COMPLETE_PARAM}'"
        )));
    }

    session.list_mut().complete(id).map_err(StoreError::from)?;
    session.commit().await?;

    Ok(reply::text(StatusCode::NO_CONTENT, ""))
}

fn has_query_param(uri: &Uri, name: &str) -> Result<bool, ApiError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|error| ApiError::InvalidData(format!("Invalid query: {error}")))?;
    Ok(pairs.iter().any(|(key, _)| key == name))
}

// =============================================================================
// Root Handlers
// =============================================================================

/// `GET /`: fixed text, status 200. Any other method is a 404.
pub async fn root(method: Method, uri: Uri) -> Response {
    if method == Method::GET {
        reply::text(StatusCode::OK, ROOT_CONTENT)
    } else {
        not_found(method, uri).await
    }
}

/// Fallback for every path no route claims.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    let error = ApiError::NotFound(format!("no route for {}", uri.path()));
    reply::error(&RequestContext::new(method, uri), &error)
}

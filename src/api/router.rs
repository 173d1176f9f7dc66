//! Request routing for the to-do API.
//!
//! # Routes
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | / | fixed text |
//! | GET | /todo | list all items |
//! | POST | /todo | add an item |
//! | GET | /todo/{id} | get one item |
//! | DELETE | /todo/{id} | delete an item |
//! | PATCH | /todo/{id}?complete | mark an item done |
//!
//! `/todo` and `/todo/` are equivalent. Every `/todo` request holds the list
//! lock from load to save, so requests are served one at a time. That
//! section runs to completion even if the client goes away.

use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, Uri};
use axum::response::Response;
use axum::routing::any;
use tower_http::timeout::RequestBodyTimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::handlers::{self, AppState};
use super::reply::{self, RequestContext};
use super::validate::validate_id;
use crate::domain::TodoList;
use crate::infrastructure::ListSession;

// =============================================================================
// Dispatch Table
// =============================================================================

/// Shape of the path left after stripping the `/todo` mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape<'a> {
    /// Empty remainder: the whole list.
    Collection,
    /// Non-empty remainder: an unvalidated identifier.
    Item(&'a str),
}

impl<'a> PathShape<'a> {
    #[must_use]
    pub const fn parse(path: &'a str) -> Self {
        if path.is_empty() {
            Self::Collection
        } else {
            Self::Item(path)
        }
    }
}

/// The five operations of the API. Item operations carry a validated id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAll,
    Add,
    GetOne(usize),
    Delete(usize),
    Complete(usize),
}

/// Selects the operation for `method` on `shape`.
///
/// Item paths are validated before the method is looked at, so a bad id
/// wins over an unsupported method.
///
/// # Errors
///
/// - [`ApiError::InvalidData`] / [`ApiError::NotFound`] from id validation.
/// - [`ApiError::MethodNotSupported`] if nothing is served for `method`.
pub fn resolve(method: &Method, shape: PathShape<'_>, list: &TodoList) -> Result<Operation, ApiError> {
    let operation = match shape {
        PathShape::Collection => match *method {
            Method::GET => Some(Operation::ListAll),
            Method::POST => Some(Operation::Add),
            _ => None,
        },
        PathShape::Item(segment) => {
            let id = validate_id(segment, list)?;
            match *method {
                Method::GET => Some(Operation::GetOne(id)),
                Method::DELETE => Some(Operation::Delete(id)),
                Method::PATCH => Some(Operation::Complete(id)),
                _ => None,
            }
        }
    };

    operation.ok_or(ApiError::MethodNotSupported)
}

async fn execute(
    operation: Operation,
    session: &mut ListSession<'_>,
    context: &RequestContext,
    body: &[u8],
) -> Result<Response, ApiError> {
    match operation {
        Operation::ListAll => handlers::list_all(session.list()),
        Operation::Add => handlers::add(session, body).await,
        Operation::GetOne(id) => handlers::get_one(session.list(), id),
        Operation::Delete(id) => handlers::delete(session, id).await,
        Operation::Complete(id) => handlers::complete(session, &context.uri, id).await,
    }
}

/// Serves one `/todo` request under the list lock.
///
/// `path` is the request path with the `/todo` mount stripped. A failed
/// initial load short-circuits with a 500 before any routing happens.
///
/// The critical section runs on its own task. Dropping the returned future
/// (a client disconnect, an outer deadline) does not cancel it, so the lock
/// is only released once the list has been written back.
pub async fn dispatch(
    state: AppState,
    context: RequestContext,
    path: String,
    body: Bytes,
) -> Response {
    let task_context = context.clone();
    let critical_section =
        tokio::spawn(async move { serve_locked(&state, &task_context, &path, &body).await });

    match critical_section.await {
        Ok(response) => response,
        Err(error) => reply::error(&context, &ApiError::Aborted(error)),
    }
}

async fn serve_locked(
    state: &AppState,
    context: &RequestContext,
    path: &str,
    body: &[u8],
) -> Response {
    let mut session = match state.todo_list.checkout().await {
        Ok(session) => session,
        Err(error) => return reply::error(context, &ApiError::Storage(error)),
    };

    let result = match resolve(&context.method, PathShape::parse(path), session.list()) {
        Ok(operation) => execute(operation, &mut session, context, body).await,
        Err(error) => Err(error),
    };

    result.unwrap_or_else(|error| reply::error(context, &error))
}

// =============================================================================
// Axum Wiring
// =============================================================================

async fn collection_route(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    dispatch(state, RequestContext::new(method, uri), String::new(), body).await
}

async fn item_route(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    dispatch(state, RequestContext::new(method, uri), segment, body).await
}

/// Creates the router with all routes and the given state.
///
/// # Examples
///
/// ```ignore
/// let store = Arc::new(FileTodoStore::new("todoServer.json"));
/// let router = create_router(AppState::new(SharedTodoList::new(store)));
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::root))
        .route("/todo", any(collection_route))
        .route("/todo/", any(collection_route))
        .route("/todo/{*segment}", any(item_route))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Wraps `router` with request tracing and a deadline for receiving the
/// request body.
///
/// The deadline only covers reading the body, which completes before a
/// handler runs. Nothing cuts a request short once it holds the list lock.
pub fn with_middleware(router: Router, read_timeout: Duration) -> Router {
    router
        .layer(RequestBodyTimeoutLayer::new(read_timeout))
        .layer(TraceLayer::new_for_http())
}

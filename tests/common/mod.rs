//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every helper is used by
//! every test file.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use todo_server::api::{AppState, create_router};
use todo_server::domain::TodoList;
use todo_server::infrastructure::{
    FileTodoStore, InMemoryTodoStore, SharedTodoList, StoreError, TodoStore,
};

// =============================================================================
// Test Application
// =============================================================================

/// Router over a file store in a private temporary directory.
pub struct TestApp {
    pub router: Router,
    pub todo_file: PathBuf,
    _directory: TempDir,
}

impl TestApp {
    /// Creates an app whose backing file does not exist yet.
    pub fn new() -> Self {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let todo_file = directory.path().join("todo.json");
        let store = Arc::new(FileTodoStore::new(todo_file.clone()));
        let router = create_router(AppState::new(SharedTodoList::new(store)));

        Self {
            router,
            todo_file,
            _directory: directory,
        }
    }

    /// Creates an app whose backing file holds `contents`.
    pub fn with_file_contents(contents: &[u8]) -> Self {
        let app = Self::new();
        std::fs::write(&app.todo_file, contents).expect("Failed to seed todo file");
        app
    }

    /// Sends one request and collects the reply.
    pub async fn send(&self, method: Method, uri: &str, body: &str) -> TestResponse {
        send(&self.router, method, uri, body).await
    }

    /// Raw bytes of the backing file, or empty if it was never written.
    pub fn file_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.todo_file).unwrap_or_default()
    }

    /// The list as currently persisted.
    pub fn persisted_list(&self) -> TodoList {
        read_list(&self.todo_file)
    }
}

/// Router over an arbitrary store.
pub fn router_with_store(store: Arc<dyn TodoStore + Send + Sync>) -> Router {
    create_router(AppState::new(SharedTodoList::new(store)))
}

/// Router over a fresh in-memory store, returned with a handle to the store.
pub fn in_memory_router() -> (Router, InMemoryTodoStore) {
    let store = InMemoryTodoStore::new();
    (router_with_store(Arc::new(store.clone())), store)
}

pub fn read_list(path: &Path) -> TodoList {
    let contents = std::fs::read(path).unwrap_or_default();
    if contents.is_empty() {
        return TodoList::new();
    }
    serde_json::from_slice(&contents).expect("Persisted file is not a valid list")
}

// =============================================================================
// Requests
// =============================================================================

/// Collected reply.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Body is not JSON")
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
    }
}

// =============================================================================
// Failing Store
// =============================================================================

/// Loads from an inner store but refuses every save.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyTodoStore {
    inner: InMemoryTodoStore,
}

impl ReadOnlyTodoStore {
    pub fn with_list(list: TodoList) -> Self {
        Self {
            inner: InMemoryTodoStore::with_list(list),
        }
    }
}

impl TodoStore for ReadOnlyTodoStore {
    fn load(&self) -> BoxFuture<'_, Result<TodoList, StoreError>> {
        self.inner.load()
    }

    fn save<'a>(&'a self, _list: &'a TodoList) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            Err(StoreError::Io {
                path: PathBuf::from("read-only"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        })
    }
}

// =============================================================================
// Slow Store
// =============================================================================

/// In-memory store whose saves hold a blocking thread for `delay`, the way a
/// file write does. Counts loads that start while a save is still running.
#[derive(Debug, Clone)]
pub struct SlowSaveTodoStore {
    inner: InMemoryTodoStore,
    delay: Duration,
    saving: Arc<AtomicBool>,
    overlapping_loads: Arc<AtomicUsize>,
}

impl SlowSaveTodoStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryTodoStore::new(),
            delay,
            saving: Arc::new(AtomicBool::new(false)),
            overlapping_loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn overlapping_loads(&self) -> usize {
        self.overlapping_loads.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryTodoStore {
        &self.inner
    }
}

impl TodoStore for SlowSaveTodoStore {
    fn load(&self) -> BoxFuture<'_, Result<TodoList, StoreError>> {
        if self.saving.load(Ordering::SeqCst) {
            self.overlapping_loads.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.load()
    }

    fn save<'a>(&'a self, list: &'a TodoList) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.saving.store(true, Ordering::SeqCst);
            let delay = self.delay;
            tokio::task::spawn_blocking(move || std::thread::sleep(delay))
                .await
                .expect("Blocking write panicked");
            let result = self.inner.save(list).await;
            self.saving.store(false, Ordering::SeqCst);
            result
        })
    }
}

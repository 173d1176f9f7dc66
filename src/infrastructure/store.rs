//! Store adapters for the to-do list.
//!
//! A store loads the whole list and overwrites it wholesale. There is no
//! partial update and no cache: every request reads the current contents
//! and every mutating request writes them back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::{ItemDoesNotExist, TodoList};

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored contents could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A positional mutator was given an out-of-range identifier.
    #[error(transparent)]
    ItemDoesNotExist(#[from] ItemDoesNotExist),
}

// =============================================================================
// Store Trait
// =============================================================================

/// Persistence contract for the to-do list.
///
/// Methods return boxed futures so the trait stays object safe and can be
/// shared as `Arc<dyn TodoStore + Send + Sync>`.
pub trait TodoStore: Send + Sync {
    /// Loads the full list.
    fn load(&self) -> BoxFuture<'_, Result<TodoList, StoreError>>;

    /// Replaces the stored list with `list`.
    fn save<'a>(&'a self, list: &'a TodoList) -> BoxFuture<'a, Result<(), StoreError>>;
}

// =============================================================================
// File Store
// =============================================================================

/// JSON file backed store.
///
/// A missing or empty file loads as an empty list.
#[derive(Debug, Clone)]
pub struct FileTodoStore {
    path: PathBuf,
}

impl FileTodoStore {
    /// Creates a store over the file at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TodoStore for FileTodoStore {
    fn load(&self) -> BoxFuture<'_, Result<TodoList, StoreError>> {
        Box::pin(async move {
            let contents = match tokio::fs::read(&self.path).await {
                Ok(contents) => contents,
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                    return Ok(TodoList::new());
                }
                Err(error) => return Err(self.io_error(error)),
            };

            if contents.is_empty() {
                return Ok(TodoList::new());
            }

            Ok(serde_json::from_slice(&contents)?)
        })
    }

    fn save<'a>(&'a self, list: &'a TodoList) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let contents = serde_json::to_vec(list)?;
            tokio::fs::write(&self.path, contents)
                .await
                .map_err(|error| self.io_error(error))
        })
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Store that keeps the list in memory.
///
/// Clones share the same underlying list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    list: Arc<RwLock<TodoList>>,
}

impl InMemoryTodoStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `list`.
    #[must_use]
    pub fn with_list(list: TodoList) -> Self {
        Self {
            list: Arc::new(RwLock::new(list)),
        }
    }
}

impl TodoStore for InMemoryTodoStore {
    fn load(&self) -> BoxFuture<'_, Result<TodoList, StoreError>> {
        Box::pin(async move { Ok(self.list.read().await.clone()) })
    }

    fn save<'a>(&'a self, list: &'a TodoList) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            *self.list.write().await = list.clone();
            Ok(())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

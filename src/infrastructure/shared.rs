//! Single-writer guard around the store.
//!
//! One lock serializes every request that touches the list, reads included.
//! A [`ListSession`] holds the lock from the initial load until it is
//! dropped, so load, mutation and save form one critical section.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::store::{StoreError, TodoStore};
use crate::domain::TodoList;

/// Store plus the lock that serializes access to it.
#[derive(Clone)]
pub struct SharedTodoList {
    store: Arc<dyn TodoStore + Send + Sync>,
    lock: Arc<Mutex<()>>,
}

impl SharedTodoList {
    /// Wraps `store` with a fresh lock.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore + Send + Sync>) -> Self {
        Self {
            store,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Acquires the lock and loads the current list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the load fails. The lock is released before
    /// returning in that case.
    pub async fn checkout(&self) -> Result<ListSession<'_>, StoreError> {
        let guard = self.lock.lock().await;
        let list = self.store.load().await?;
        Ok(ListSession {
            _guard: guard,
            store: self.store.as_ref(),
            list,
        })
    }
}

impl std::fmt::Debug for SharedTodoList {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SharedTodoList")
            .finish_non_exhaustive()
    }
}

/// A loaded list with exclusive access for the lifetime of the session.
pub struct ListSession<'a> {
    _guard: MutexGuard<'a, ()>,
    store: &'a (dyn TodoStore + Send + Sync),
    list: TodoList,
}

impl ListSession<'_> {
    /// The list as loaded, plus any mutations made in this session.
    #[must_use]
    pub const fn list(&self) -> &TodoList {
        &self.list
    }

    /// Mutable access for the positional mutators.
    pub const fn list_mut(&mut self) -> &mut TodoList {
        &mut self.list
    }

    /// Writes the session's list back to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the save fails.
    pub async fn commit(&self) -> Result<(), StoreError> {
        self.store.save(&self.list).await
    }
}

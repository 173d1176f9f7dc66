//! Infrastructure module.
//!
//! This module contains the store adapters, the single-writer guard and
//! runtime configuration.

pub mod config;
pub mod shared;
pub mod store;

pub use config::{ConfigurationError, LogFormat, ServerConfig};
pub use shared::{ListSession, SharedTodoList};
pub use store::{FileTodoStore, InMemoryTodoStore, StoreError, TodoStore};

//! To-do List Server Library
//!
//! An HTTP front-end over a to-do list persisted in a single JSON file.
//! The file is re-read and rewritten on every request under one
//! process-wide lock.

pub mod api;
pub mod domain;
pub mod infrastructure;

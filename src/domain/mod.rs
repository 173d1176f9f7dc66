//! Domain module for the to-do list.
//!
//! This module contains the item model and the ordered list that owns it.

pub mod todo;

pub use todo::{Item, ItemDoesNotExist, TodoList};

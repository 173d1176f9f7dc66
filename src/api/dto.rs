//! Request and response bodies.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::Item;

/// Body of `POST /todo`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddItemRequest {
    /// Task description of the new item.
    pub task: String,
}

/// JSON envelope wrapping a sub-sequence of the list.
///
/// ```json
/// {
///   "results": [{"Task": "buy milk", "Done": false, "CreatedAt": "...", "CompletedAt": null}],
///   "date": 1700000000,
///   "total_results": 1
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse<'a> {
    /// The items being returned.
    pub results: &'a [Item],
    /// Unix time at which the reply was built.
    pub date: i64,
    /// Always `results.len()`.
    pub total_results: usize,
}

impl<'a> TodoResponse<'a> {
    /// Wraps `results`, stamping the current time.
    #[must_use]
    pub fn new(results: &'a [Item]) -> Self {
        Self {
            results,
            date: Utc::now().timestamp(),
            total_results: results.len(),
        }
    }
}

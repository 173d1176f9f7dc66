//! To-do item domain model.
//!
//! Items have no stable key. The identifier a client sees is the item's
//! 1-based position in the list at the time of the request, so deleting an
//! item shifts every later identifier down by one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Item
// =============================================================================

/// A single to-do entry.
///
/// Field names are serialized in `PascalCase` so the persisted file stays
/// readable by the companion command-line tool that shares the format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    /// Task description.
    pub task: String,
    /// Completion flag.
    pub done: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time the item was last marked complete.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Creates a new, incomplete item.
    #[must_use]
    pub fn new(task: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            task: task.into(),
            done: false,
            created_at,
            completed_at: None,
        }
    }
}

// =============================================================================
// TodoList
// =============================================================================

/// Raised by the positional mutators when an identifier is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Item {0} does not exist")]
pub struct ItemDoesNotExist(pub usize);

/// Ordered collection of items; insertion order is identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList(Vec<Item>);

impl TodoList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of items in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All items, in identifier order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.0
    }

    /// Returns the item at the 1-based identifier, if any.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Item> {
        id.checked_sub(1).and_then(|index| self.0.get(index))
    }

    /// Returns the single-item slice at the 1-based identifier.
    ///
    /// The slice is empty when the identifier is out of range.
    #[must_use]
    pub fn slice_one(&self, id: usize) -> &[Item] {
        match id.checked_sub(1) {
            Some(index) if index < self.0.len() => &self.0[index..=index],
            _ => &[],
        }
    }

    /// Appends a new incomplete item stamped with the current time.
    pub fn add(&mut self, task: impl Into<String>) {
        self.0.push(Item::new(task, Utc::now()));
    }

    /// Marks the item at the 1-based identifier as done.
    ///
    /// Completing an already-complete item is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDoesNotExist`] when `id` is outside `1..=len`.
    pub fn complete(&mut self, id: usize) -> Result<(), ItemDoesNotExist> {
        let index = self.index_of(id)?;
        let item = &mut self.0[index];
        item.done = true;
        item.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Removes the item at the 1-based identifier, shifting later items down.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDoesNotExist`] when `id` is outside `1..=len`.
    pub fn delete(&mut self, id: usize) -> Result<Item, ItemDoesNotExist> {
        let index = self.index_of(id)?;
        Ok(self.0.remove(index))
    }

    fn index_of(&self, id: usize) -> Result<usize, ItemDoesNotExist> {
        match id.checked_sub(1) {
            Some(index) if index < self.0.len() => Ok(index),
            _ => Err(ItemDoesNotExist(id)),
        }
    }
}

impl From<Vec<Item>> for TodoList {
    fn from(items: Vec<Item>) -> Self {
        Self(items)
    }
}

impl FromIterator<Item> for TodoList {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn list_of(tasks: &[&str]) -> TodoList {
        let mut list = TodoList::new();
        for task in tasks {
            list.add(*task);
        }
        list
    }

    #[rstest]
    fn test_add_appends_incomplete_item() {
        let mut list = list_of(&["first"]);
        list.add("second");

        assert_eq!(list.len(), 2);
        let last = list.get(2).unwrap();
        assert_eq!(last.task, "second");
        assert!(!last.done);
        assert!(last.completed_at.is_none());
    }

    #[rstest]
    fn test_complete_is_idempotent() {
        let mut list = list_of(&["only"]);

        assert!(list.complete(1).is_ok());
        assert!(list.complete(1).is_ok());

        let item = list.get(1).unwrap();
        assert!(item.done);
        assert!(item.completed_at.is_some());
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    fn test_complete_out_of_range(#[case] id: usize) {
        let mut list = list_of(&["a", "b"]);
        assert_eq!(list.complete(id), Err(ItemDoesNotExist(id)));
    }

    #[rstest]
    fn test_delete_shifts_identifiers() {
        let mut list = list_of(&["a", "b", "c"]);

        let removed = list.delete(2).unwrap();

        assert_eq!(removed.task, "b");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(2).unwrap().task, "c");
    }

    #[rstest]
    fn test_delete_out_of_range() {
        let mut list = TodoList::new();
        assert_eq!(list.delete(1), Err(ItemDoesNotExist(1)));
    }

    #[rstest]
    fn test_slice_one() {
        let list = list_of(&["a", "b"]);

        assert_eq!(list.slice_one(2).len(), 1);
        assert_eq!(list.slice_one(2)[0].task, "b");
        assert!(list.slice_one(0).is_empty());
        assert!(list.slice_one(3).is_empty());
    }

    #[rstest]
    fn test_serialized_field_names() {
        let list = list_of(&["buy milk"]);
        let json = serde_json::to_value(&list).unwrap();

        let item = &json[0];
        assert_eq!(item["Task"], "buy milk");
        assert_eq!(item["Done"], false);
        assert!(item["CreatedAt"].is_string());
        assert!(item["CompletedAt"].is_null());
    }

    #[rstest]
    fn test_deserialize_without_completed_at() {
        let json = r#"[{"Task":"x","Done":true,"CreatedAt":"2024-01-01T00:00:00Z"}]"#;
        let list: TodoList = serde_json::from_str(json).unwrap();

        assert_eq!(list.len(), 1);
        assert!(list.get(1).unwrap().done);
        assert!(list.get(1).unwrap().completed_at.is_none());
    }

    proptest! {
        #[test]
        fn prop_delete_removes_exactly_one(length in 1usize..20, pick in 0usize..20) {
            let id = pick % length + 1;
            let tasks: Vec<String> = (0..length).map(|n| format!("task-{n}")).collect();
            let mut list: TodoList = tasks.iter().map(|t| Item::new(t.clone(), Utc::now())).collect();

            list.delete(id).unwrap();

            let remaining: Vec<&str> = list.items().iter().map(|item| item.task.as_str()).collect();
            let mut expected: Vec<&str> = tasks.iter().map(String::as_str).collect();
            expected.remove(id - 1);
            prop_assert_eq!(remaining, expected);
        }
    }
}

//! Ordered, position-addressed item list.
//!
//! # Responsibility
//! - Own the in-memory sequence of items.
//! - Reject out-of-range positions instead of panicking.
//!
//! # Invariants
//! - `remove_at` shifts every later item up by one position.
//! - `replace` never changes the list length.
//! - A failed operation leaves the list untouched.

use crate::model::item::Item;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ListResult<T> = Result<T, ListError>;

/// Error for position-addressed list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// `position` does not address an item in a list of `len` items.
    OutOfRange { position: usize, len: usize },
    /// An edit result targets a row that no longer holds the edited item.
    StaleEdit { position: usize },
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { position, len } => {
                write!(f, "position {position} is out of range for {len} item(s)")
            }
            Self::StaleEdit { position } => write!(
                f,
                "edit result for position {position} no longer matches the list"
            ),
        }
    }
}

impl Error for ListError {}

/// Positional change notification emitted after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListChange {
    /// A row was inserted at `position`.
    Inserted { position: usize },
    /// The row at `position` now shows different text.
    Changed { position: usize },
    /// The row at `position` was removed; later rows moved up.
    Removed { position: usize },
}

impl ListChange {
    /// Returns the affected position.
    pub fn position(&self) -> usize {
        match self {
            Self::Inserted { position }
            | Self::Changed { position }
            | Self::Removed { position } => *position,
        }
    }

    /// Stable lowercase label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inserted { .. } => "inserted",
            Self::Changed { .. } => "changed",
            Self::Removed { .. } => "removed",
        }
    }

    /// Short user-facing notice for this change.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Inserted { .. } => "Item was added",
            Self::Changed { .. } => "Item updated successfully!",
            Self::Removed { .. } => "Item was removed",
        }
    }
}

/// In-memory todo list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from a persisted snapshot, assigning fresh ids.
    pub fn from_snapshot<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: texts.into_iter().map(Item::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    /// Returns the item at `position` or an out-of-range error.
    pub fn item(&self, position: usize) -> ListResult<&Item> {
        self.items.get(position).ok_or(ListError::OutOfRange {
            position,
            len: self.items.len(),
        })
    }

    /// Returns all items in list order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns item texts in list order, as written to the store.
    pub fn snapshot(&self) -> Vec<String> {
        self.items.iter().map(|item| item.text.clone()).collect()
    }

    /// Appends `text` and returns its position.
    pub fn append(&mut self, text: impl Into<String>) -> usize {
        self.items.push(Item::new(text));
        self.items.len() - 1
    }

    /// Overwrites the text at `position` and returns the previous text.
    ///
    /// The item keeps its id.
    pub fn replace(&mut self, position: usize, text: impl Into<String>) -> ListResult<String> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(position)
            .ok_or(ListError::OutOfRange { position, len })?;
        Ok(std::mem::replace(&mut item.text, text.into()))
    }

    /// Removes and returns the item at `position`.
    pub fn remove_at(&mut self, position: usize) -> ListResult<Item> {
        if position >= self.items.len() {
            return Err(ListError::OutOfRange {
                position,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemList, ListChange, ListError};

    fn texts(list: &ItemList) -> Vec<String> {
        list.snapshot()
    }

    #[test]
    fn append_returns_new_last_position() {
        let mut list = ItemList::new();
        assert_eq!(list.append("x"), 0);
        assert_eq!(list.append(""), 1);
        assert_eq!(texts(&list), vec!["x", ""]);
    }

    #[test]
    fn remove_shifts_later_items_up() {
        let mut list = ItemList::from_snapshot(["a", "b", "c"]);
        let removed = list.remove_at(1).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(texts(&list), vec!["a", "c"]);

        list.remove_at(0).unwrap();
        assert_eq!(texts(&list), vec!["c"]);
    }

    #[test]
    fn replace_keeps_length_and_id() {
        let mut list = ItemList::from_snapshot(["x"]);
        let id = list.get(0).unwrap().id;
        let previous = list.replace(0, "y").unwrap();
        assert_eq!(previous, "x");
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().id, id);
        assert_eq!(texts(&list), vec!["y"]);
    }

    #[test]
    fn out_of_range_positions_are_rejected_without_mutation() {
        let mut list = ItemList::from_snapshot(["a"]);
        assert_eq!(
            list.replace(1, "z").unwrap_err(),
            ListError::OutOfRange {
                position: 1,
                len: 1,
            }
        );
        assert_eq!(
            list.remove_at(5).unwrap_err(),
            ListError::OutOfRange {
                position: 5,
                len: 1,
            }
        );
        assert_eq!(texts(&list), vec!["a"]);
    }

    #[test]
    fn change_notices_match_kind() {
        assert_eq!(
            ListChange::Inserted { position: 0 }.notice(),
            "Item was added"
        );
        assert_eq!(ListChange::Removed { position: 3 }.position(), 3);
    }
}

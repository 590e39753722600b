//! Todo item record.
//!
//! # Responsibility
//! - Define the single-attribute item shared by model, binder and hosts.
//! - Attach a session-stable identity to every item.
//!
//! # Invariants
//! - `id` is generated when the item enters memory and is never persisted.
//! - `id` is never reused for another item in the same process.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Session-stable identifier for one item.
///
/// Positions shift on removal; the id does not. It lets an edit result be
/// checked against the row it was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

impl From<Uuid> for ItemId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// One line of user-entered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// In-memory identity; not part of the persisted snapshot.
    pub id: ItemId,
    /// Display text. May be empty.
    pub text: String,
}

impl Item {
    /// Creates an item with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(ItemId::new(), text)
    }

    /// Creates an item with a caller-provided id.
    pub fn with_id(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemId};

    #[test]
    fn new_items_get_distinct_ids() {
        let first = Item::new("a");
        let second = Item::new("a");
        assert_ne!(first.id, second.id);
        assert!(!first.id.as_uuid().is_nil());
    }

    #[test]
    fn empty_text_is_kept() {
        let item = Item::new("");
        assert_eq!(item.text, "");
    }

    #[test]
    fn id_displays_as_uuid() {
        let id = ItemId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
        assert_eq!(id.to_string().parse::<ItemId>().unwrap(), id);
    }
}

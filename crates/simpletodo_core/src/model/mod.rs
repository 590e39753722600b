//! In-memory list model for todo items.
//!
//! # Responsibility
//! - Define the item record and the ordered list that owns it.
//! - Describe list mutations as positional change notifications.
//!
//! # Invariants
//! - Positions are contiguous zero-based indices.
//! - Item text is stored as-is; empty text is a valid item.

pub mod item;
pub mod list;

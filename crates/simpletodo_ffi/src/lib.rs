//! Flutter-facing bindings for SimpleTodo core.

pub mod api;

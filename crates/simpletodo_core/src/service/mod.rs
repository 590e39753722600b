//! Core use-case services.
//!
//! # Responsibility
//! - Wire user actions to model mutations, view notifications and persistence.
//! - Keep FFI/CLI hosts decoupled from storage details.

pub mod controller;

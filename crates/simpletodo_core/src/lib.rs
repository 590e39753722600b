//! Core domain logic for SimpleTodo.
//! This crate is the single source of truth for list invariants.

pub mod binder;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use binder::{
    dispatch, ItemsBinder, ListObserver, RecordingObserver, Row, RowCallbacks, RowEvent,
    RowListener,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{Item, ItemId};
pub use model::list::{ItemList, ListChange, ListError, ListResult};
pub use service::controller::{EditRequest, EditResult, MutationReport, RowOutcome, TodoController};
pub use store::{LineFileStore, LineStore, MemoryLineStore, StoreError, StoreResult, DATA_FILE_NAME};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Snapshot persistence for the todo list.
//!
//! # Responsibility
//! - Define the load/save contract used by the controller.
//! - Keep file-format details out of the service layer.
//!
//! # Invariants
//! - `load` never fails; a missing or unreadable snapshot is an empty list.
//! - `save` fully replaces the previous snapshot.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod line_file;
mod memory;

pub use line_file::{LineFileStore, DATA_FILE_NAME};
pub use memory::MemoryLineStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised when a snapshot cannot be read or written.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Persistence contract for ordered line snapshots.
pub trait LineStore {
    /// Reads the persisted snapshot; recovers to an empty list on failure.
    fn load(&self) -> Vec<String>;
    /// Overwrites the persisted snapshot with `lines`, in order.
    fn save(&mut self, lines: &[String]) -> StoreResult<()>;
}

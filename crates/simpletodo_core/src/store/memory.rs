//! In-memory line store for hosts without durable storage and for tests.

use super::{LineStore, StoreResult};

/// Line store that keeps the last saved snapshot in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLineStore {
    lines: Vec<String>,
    saves: usize,
}

impl MemoryLineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose first `load` returns `lines`.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            saves: 0,
        }
    }

    /// Returns the last saved snapshot.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LineStore for MemoryLineStore {
    fn load(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn save(&mut self, lines: &[String]) -> StoreResult<()> {
        self.lines = lines.to_vec();
        self.saves += 1;
        Ok(())
    }
}

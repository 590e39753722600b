//! Plain-text line file store.
//!
//! # Responsibility
//! - Read and write one item per line in a single UTF-8 file.
//!
//! # Invariants
//! - Writes are full overwrites; there is no append or diff path.
//! - Embedded line breaks are not escaped. An item containing `\n` (or a
//!   trailing `\r`) is split or trimmed on the next load.
//! - Writes are not atomic; a crash mid-write may truncate the file.

use super::{LineStore, StoreError, StoreResult};
use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name used inside the app data directory.
pub const DATA_FILE_NAME: &str = "data.txt";

/// Line store backed by one file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFileStore {
    path: PathBuf,
}

impl LineFileStore {
    /// Creates a store for an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store for `data.txt` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file strictly.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read_lines(&self) -> StoreResult<Option<Vec<String>>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.lines().map(str::to_owned).collect())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Writes `lines` strictly, creating the parent directory when needed.
    pub fn write_lines(&self, lines: &[String]) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let mut content = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(io_err)
    }
}

impl LineStore for LineFileStore {
    fn load(&self) -> Vec<String> {
        let started_at = Instant::now();
        match self.read_lines() {
            Ok(Some(lines)) => {
                info!(
                    "event=store_load module=store status=ok lines={} duration_ms={}",
                    lines.len(),
                    started_at.elapsed().as_millis()
                );
                lines
            }
            Ok(None) => {
                info!(
                    "event=store_load module=store status=missing path={}",
                    self.path.display()
                );
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=empty error_code=read_failed error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, lines: &[String]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_lines(lines) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok lines={} duration_ms={}",
                    lines.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error error_code=write_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LineFileStore, DATA_FILE_NAME};
    use crate::store::LineStore;
    use std::fs;

    #[test]
    fn in_dir_uses_data_file_name() {
        let store = LineFileStore::in_dir("/tmp/simpletodo");
        assert!(store.path().ends_with(DATA_FILE_NAME));
    }

    #[test]
    fn save_writes_one_line_per_item() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LineFileStore::in_dir(dir.path());
        store
            .save(&["a".to_string(), String::new(), "c".to_string()])
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "a\n\nc\n");
    }

    #[test]
    fn empty_snapshot_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LineFileStore::in_dir(dir.path());
        store.save(&["x".to_string()]).unwrap();
        store.save(&[]).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_accepts_crlf_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let store = LineFileStore::in_dir(dir.path());
        fs::write(store.path(), "one\r\ntwo\r\n").unwrap();
        assert_eq!(store.load(), vec!["one", "two"]);
    }

    #[test]
    fn read_lines_reports_missing_file_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LineFileStore::in_dir(dir.path());
        assert_eq!(store.read_lines().unwrap(), None);
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LineFileStore::in_dir(dir.path().join("nested").join("files"));
        store.save(&["x".to_string()]).unwrap();
        assert_eq!(store.load(), vec!["x"]);
    }
}

//! Todo list controller.
//!
//! # Responsibility
//! - Own the in-memory list for one session.
//! - Apply add/edit/delete, notify the binder, then persist the snapshot.
//! - Drive the edit round trip (request out, saved/cancelled result in).
//!
//! # Invariants
//! - The store is loaded exactly once, in `open`.
//! - Every successful mutation notifies the binder once, then saves once.
//! - A failed mutation notifies nothing and saves nothing.
//! - A failed save never rolls back the in-memory mutation.

use crate::binder::{self, ItemsBinder, ListObserver, Row, RowEvent, RowListener};
use crate::model::item::ItemId;
use crate::model::list::{ItemList, ListChange, ListError, ListResult};
use crate::store::LineStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Outcome of one successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReport {
    /// Positional change sent to the binder.
    pub change: ListChange,
    /// Whether the snapshot reached the store.
    pub persisted: bool,
}

impl MutationReport {
    pub fn notice(&self) -> &'static str {
        self.change.notice()
    }
}

/// Data handed to the external edit surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub position: usize,
    pub item_id: ItemId,
    pub text: String,
}

impl EditRequest {
    /// Builds the saved result for this request.
    pub fn complete(&self, text: impl Into<String>) -> EditResult {
        EditResult::Saved {
            position: self.position,
            item_id: Some(self.item_id),
            text: text.into(),
        }
    }
}

/// Result returned by the external edit surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditResult {
    /// New text for the row the request was opened for.
    ///
    /// When `item_id` is set, the row at `position` must still hold that item.
    Saved {
        position: usize,
        item_id: Option<ItemId>,
        text: String,
    },
    /// Edit dismissed; the model stays unchanged.
    Cancelled,
}

/// What a routed row event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Tap: the host should open the edit surface with this request.
    EditRequested(EditRequest),
    /// Long-press: the row was deleted.
    Removed(MutationReport),
}

/// Session controller over a list, a binder and a store.
pub struct TodoController<S: LineStore, O: ListObserver> {
    items: ItemList,
    binder: ItemsBinder<O>,
    store: S,
}

impl<S: LineStore, O: ListObserver> TodoController<S, O> {
    /// Loads the persisted snapshot and starts a session.
    pub fn open(store: S, observer: O) -> Self {
        let items = ItemList::from_snapshot(store.load());
        info!(
            "event=controller_open module=controller status=ok items={}",
            items.len()
        );
        Self {
            items,
            binder: ItemsBinder::new(observer),
            store,
        }
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.binder.item_count(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds the row for `position` from current model state.
    pub fn bind_row(&self, position: usize) -> ListResult<Row> {
        self.binder.bind_row(&self.items, position)
    }

    /// Builds every row in list order.
    pub fn rows(&self) -> Vec<Row> {
        self.binder.rows(&self.items)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn observer(&self) -> &O {
        self.binder.observer()
    }

    pub fn observer_mut(&mut self) -> &mut O {
        self.binder.observer_mut()
    }

    /// Appends `text` as-is; empty text is accepted.
    pub fn append(&mut self, text: impl Into<String>) -> MutationReport {
        let position = self.items.append(text);
        self.commit(ListChange::Inserted { position })
    }

    /// Overwrites the text at `position`.
    pub fn replace(
        &mut self,
        position: usize,
        text: impl Into<String>,
    ) -> ListResult<MutationReport> {
        self.items.replace(position, text)?;
        Ok(self.commit(ListChange::Changed { position }))
    }

    /// Deletes the item at `position`; later items move up by one.
    pub fn remove_at(&mut self, position: usize) -> ListResult<MutationReport> {
        self.items.remove_at(position)?;
        Ok(self.commit(ListChange::Removed { position }))
    }

    /// Captures the current text at `position` for the edit surface.
    pub fn begin_edit(&self, position: usize) -> ListResult<EditRequest> {
        let item = self.items.item(position)?;
        Ok(EditRequest {
            position,
            item_id: item.id,
            text: item.text.clone(),
        })
    }

    /// Applies the edit surface result.
    ///
    /// Returns `Ok(None)` when the edit was cancelled.
    ///
    /// # Errors
    /// - `ListError::OutOfRange` when `position` no longer exists.
    /// - `ListError::StaleEdit` when the row at `position` holds another item.
    pub fn finish_edit(&mut self, result: EditResult) -> ListResult<Option<MutationReport>> {
        match result {
            EditResult::Saved {
                position,
                item_id,
                text,
            } => {
                let current = self.items.item(position)?;
                if item_id.is_some_and(|id| id != current.id) {
                    warn!(
                        "event=edit_finish module=controller status=stale position={}",
                        position
                    );
                    return Err(ListError::StaleEdit { position });
                }
                self.replace(position, text).map(Some)
            }
            EditResult::Cancelled => {
                warn!("event=edit_finish module=controller status=cancelled");
                Ok(None)
            }
        }
    }

    /// Routes a host row event: tap opens an edit, long-press deletes.
    pub fn handle_row_event(&mut self, event: RowEvent) -> ListResult<RowOutcome> {
        let row_count = self.len();
        binder::dispatch(event, row_count, self)?
    }

    fn commit(&mut self, change: ListChange) -> MutationReport {
        self.binder.notify(change);
        let persisted = match self.store.save(&self.items.snapshot()) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=persist module=controller status=error items={} error={}",
                    self.items.len(),
                    err
                );
                false
            }
        };
        info!(
            "event=mutation module=controller status=ok change={} position={} persisted={}",
            change.kind(),
            change.position(),
            persisted
        );
        MutationReport { change, persisted }
    }
}

impl<S: LineStore, O: ListObserver> RowListener for TodoController<S, O> {
    type Output = ListResult<RowOutcome>;

    fn on_item_clicked(&mut self, position: usize) -> Self::Output {
        self.begin_edit(position).map(RowOutcome::EditRequested)
    }

    fn on_item_long_clicked(&mut self, position: usize) -> Self::Output {
        self.remove_at(position).map(RowOutcome::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::{EditResult, RowOutcome, TodoController};
    use crate::binder::{RecordingObserver, RowEvent};
    use crate::model::list::{ListChange, ListError};
    use crate::store::{LineStore, MemoryLineStore, StoreError, StoreResult};

    fn controller(lines: &[&str]) -> TodoController<MemoryLineStore, RecordingObserver> {
        TodoController::open(
            MemoryLineStore::with_lines(lines.iter().copied()),
            RecordingObserver::new(),
        )
    }

    struct FailingStore;

    impl LineStore for FailingStore {
        fn load(&self) -> Vec<String> {
            vec!["kept".to_string()]
        }

        fn save(&mut self, _lines: &[String]) -> StoreResult<()> {
            Err(StoreError::Io {
                path: "/read-only/data.txt".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    #[test]
    fn append_notifies_new_last_index_and_persists() {
        let mut todo = controller(&["a"]);
        let report = todo.append("b");

        assert_eq!(report.change, ListChange::Inserted { position: 1 });
        assert!(report.persisted);
        assert_eq!(todo.store().lines(), ["a", "b"]);
        assert_eq!(
            todo.observer().pending(),
            [ListChange::Inserted { position: 1 }]
        );
    }

    #[test]
    fn failed_mutation_neither_notifies_nor_saves() {
        let mut todo = controller(&["a"]);
        assert_eq!(
            todo.remove_at(3).unwrap_err(),
            ListError::OutOfRange {
                position: 3,
                len: 1,
            }
        );
        assert!(todo.replace(1, "z").is_err());
        assert_eq!(todo.store().save_count(), 0);
        assert!(todo.observer().pending().is_empty());
    }

    #[test]
    fn save_failure_keeps_mutation_in_memory() {
        let mut todo = TodoController::open(FailingStore, RecordingObserver::new());
        let report = todo.append("new");
        assert!(!report.persisted);
        assert_eq!(todo.items().snapshot(), vec!["kept", "new"]);
    }

    #[test]
    fn edit_round_trip_replaces_text() {
        let mut todo = controller(&["x"]);
        let request = todo.begin_edit(0).unwrap();
        assert_eq!(request.text, "x");

        let report = todo.finish_edit(request.complete("y")).unwrap().unwrap();
        assert_eq!(report.change, ListChange::Changed { position: 0 });
        assert_eq!(report.notice(), "Item updated successfully!");
        assert_eq!(todo.store().lines(), ["y"]);
    }

    #[test]
    fn cancelled_edit_leaves_model_unchanged() {
        let mut todo = controller(&["x"]);
        assert_eq!(todo.finish_edit(EditResult::Cancelled).unwrap(), None);
        assert_eq!(todo.items().snapshot(), vec!["x"]);
        assert_eq!(todo.store().save_count(), 0);
    }

    #[test]
    fn stale_edit_is_rejected() {
        let mut todo = controller(&["a", "b"]);
        let request = todo.begin_edit(0).unwrap();
        todo.remove_at(0).unwrap();

        let err = todo.finish_edit(request.complete("a2")).unwrap_err();
        assert_eq!(err, ListError::StaleEdit { position: 0 });
        assert_eq!(todo.items().snapshot(), vec!["b"]);
    }

    #[test]
    fn edit_without_item_id_trusts_position() {
        let mut todo = controller(&["a"]);
        let result = EditResult::Saved {
            position: 0,
            item_id: None,
            text: "z".to_string(),
        };
        assert!(todo.finish_edit(result).unwrap().is_some());
        assert_eq!(todo.items().snapshot(), vec!["z"]);
    }

    #[test]
    fn row_events_route_to_edit_and_delete() {
        let mut todo = controller(&["a", "b", "c"]);

        match todo.handle_row_event(RowEvent::Tap { position: 2 }).unwrap() {
            RowOutcome::EditRequested(request) => assert_eq!(request.text, "c"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(todo.store().save_count(), 0);

        match todo
            .handle_row_event(RowEvent::LongPress { position: 1 })
            .unwrap()
        {
            RowOutcome::Removed(report) => {
                assert_eq!(report.change, ListChange::Removed { position: 1 })
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(todo.store().lines(), ["a", "c"]);
        assert!(todo
            .handle_row_event(RowEvent::LongPress { position: 2 })
            .is_err());
    }
}

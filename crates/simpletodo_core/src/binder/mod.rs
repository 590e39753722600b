//! Toolkit-independent list view binder.
//!
//! # Responsibility
//! - Turn model entries into renderable rows on demand.
//! - Route row tap/long-press events to a position-based listener.
//! - Forward positional change notifications to the host view.
//!
//! # Invariants
//! - Row count always equals model length.
//! - Rows are built from the model on every bind; no text is cached.
//! - The binder never mutates the model; it only reports intent.

use crate::model::item::ItemId;
use crate::model::list::{ItemList, ListChange, ListError, ListResult};
use serde::{Deserialize, Serialize};

/// Renderable row for one list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub position: usize,
    pub item_id: ItemId,
    pub text: String,
}

/// Interaction reported by the host for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowEvent {
    /// Primary activation; opens the edit flow.
    Tap { position: usize },
    /// Secondary activation; the only delete trigger.
    LongPress { position: usize },
}

impl RowEvent {
    pub fn position(&self) -> usize {
        match self {
            Self::Tap { position } | Self::LongPress { position } => *position,
        }
    }
}

/// Receiver for routed row activations.
pub trait RowListener {
    type Output;

    /// Called with the tapped row's current position.
    fn on_item_clicked(&mut self, position: usize) -> Self::Output;
    /// Called with the long-pressed row's current position.
    fn on_item_long_clicked(&mut self, position: usize) -> Self::Output;
}

/// Closure pair implementing [`RowListener`].
pub struct RowCallbacks<C, L> {
    on_click: C,
    on_long_click: L,
}

impl<C, L> RowCallbacks<C, L>
where
    C: FnMut(usize),
    L: FnMut(usize),
{
    pub fn new(on_click: C, on_long_click: L) -> Self {
        Self {
            on_click,
            on_long_click,
        }
    }
}

impl<C, L> RowListener for RowCallbacks<C, L>
where
    C: FnMut(usize),
    L: FnMut(usize),
{
    type Output = ();

    fn on_item_clicked(&mut self, position: usize) {
        (self.on_click)(position)
    }

    fn on_item_long_clicked(&mut self, position: usize) {
        (self.on_long_click)(position)
    }
}

/// Host-side sink for positional change notifications.
pub trait ListObserver {
    fn on_list_changed(&mut self, change: ListChange);
}

impl<F: FnMut(ListChange)> ListObserver for F {
    fn on_list_changed(&mut self, change: ListChange) {
        self(change)
    }
}

/// Observer that queues changes until the host drains them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingObserver {
    pending: Vec<ListChange>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns queued changes without draining them.
    pub fn pending(&self) -> &[ListChange] {
        &self.pending
    }

    /// Drains queued changes in emission order.
    pub fn take(&mut self) -> Vec<ListChange> {
        std::mem::take(&mut self.pending)
    }
}

impl ListObserver for RecordingObserver {
    fn on_list_changed(&mut self, change: ListChange) {
        self.pending.push(change);
    }
}

/// Routes `event` to `listener` after checking the position against `row_count`.
///
/// # Errors
/// - Returns `ListError::OutOfRange` for a position past the last row.
pub fn dispatch<L>(event: RowEvent, row_count: usize, listener: &mut L) -> ListResult<L::Output>
where
    L: RowListener + ?Sized,
{
    let position = event.position();
    if position >= row_count {
        return Err(ListError::OutOfRange {
            position,
            len: row_count,
        });
    }
    Ok(match event {
        RowEvent::Tap { position } => listener.on_item_clicked(position),
        RowEvent::LongPress { position } => listener.on_item_long_clicked(position),
    })
}

/// Binds list rows and forwards change notifications to an observer.
pub struct ItemsBinder<O: ListObserver> {
    observer: O,
}

impl<O: ListObserver> ItemsBinder<O> {
    pub fn new(observer: O) -> Self {
        Self { observer }
    }

    /// Number of rows the host should display.
    pub fn item_count(&self, items: &ItemList) -> usize {
        items.len()
    }

    /// Builds the row for `position` from the current model.
    pub fn bind_row(&self, items: &ItemList, position: usize) -> ListResult<Row> {
        let item = items.item(position)?;
        Ok(Row {
            position,
            item_id: item.id,
            text: item.text.clone(),
        })
    }

    /// Builds every row in list order.
    pub fn rows(&self, items: &ItemList) -> Vec<Row> {
        items
            .items()
            .iter()
            .enumerate()
            .map(|(position, item)| Row {
                position,
                item_id: item.id,
                text: item.text.clone(),
            })
            .collect()
    }

    /// Forwards one change notification to the host view.
    pub fn notify(&mut self, change: ListChange) {
        self.observer.on_list_changed(change);
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}

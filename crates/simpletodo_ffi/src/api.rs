//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the todo session (list, add, tap-to-edit, long-press delete) to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + message, never panics.
//!
//! # Invariants
//! - One session per process; the snapshot is loaded once per data file.
//! - Exported functions must not panic across FFI boundary.

use simpletodo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditResult, ItemId, LineFileStore, ListChange, MutationReport, RecordingObserver, Row,
    RowEvent, RowOutcome, TodoController,
};
use log::info;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const DATA_DIR_ENV: &str = "SIMPLETODO_DATA_DIR";
const DEFAULT_DATA_DIR_NAME: &str = "simpletodo";

type Session = TodoController<LineFileStore, RecordingObserver>;

static SESSION: OnceLock<Mutex<Option<Session>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Row projection rendered by the host list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub position: u32,
    /// Session-stable item id in string form.
    pub item_id: String,
    pub text: String,
}

/// Positional change the host list should animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChange {
    /// `inserted|changed|removed`.
    pub kind: String,
    pub position: u32,
}

/// Envelope for add/edit/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// Applied change, absent on failure or cancellation.
    pub change: Option<TodoChange>,
    /// Whether the snapshot reached disk.
    pub persisted: bool,
    /// Human-readable notice for UI/diagnostics.
    pub message: String,
}

impl TodoActionResponse {
    fn applied(report: MutationReport) -> Self {
        let message = if report.persisted {
            report.notice().to_string()
        } else {
            format!("{} (not saved to disk)", report.notice())
        };
        Self {
            ok: true,
            change: Some(to_todo_change(report.change)),
            persisted: report.persisted,
            message,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            change: None,
            persisted: false,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            change: None,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Envelope for tap-to-edit requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoEditResponse {
    pub ok: bool,
    pub position: u32,
    pub item_id: Option<String>,
    /// Current text to prefill the edit surface.
    pub text: String,
    pub message: String,
}

/// Envelope for session open and list reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    pub rows: Vec<TodoRow>,
    /// Resolved data file path.
    pub data_file: String,
    pub message: String,
}

/// Opens the todo session for `data_dir`.
///
/// Falls back to `SIMPLETODO_DATA_DIR`, then to a temp-dir location.
/// Reopening with the same data file keeps the current session.
///
/// # FFI contract
/// - Sync call; reads the data file at most once per path.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_open(data_dir: Option<String>) -> TodoListResponse {
    let store = LineFileStore::in_dir(resolve_data_dir(data_dir.as_deref()));
    let data_file = store.path().display().to_string();
    let mut guard = lock_session();

    let reuse = guard
        .as_ref()
        .is_some_and(|session| session.store().path() == store.path());
    if reuse {
        info!("event=session_open module=ffi status=reused");
    } else {
        *guard = Some(TodoController::open(store, RecordingObserver::new()));
        info!("event=session_open module=ffi status=ok");
    }

    let rows = guard.as_ref().map(session_rows).unwrap_or_default();
    let message = format!("Loaded {} item(s).", rows.len());
    TodoListResponse {
        ok: true,
        rows,
        data_file,
        message,
    }
}

/// Returns all rows of the open session.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_rows() -> TodoListResponse {
    let guard = lock_session();
    match guard.as_ref() {
        Some(session) => TodoListResponse {
            ok: true,
            rows: session_rows(session),
            data_file: session.store().path().display().to_string(),
            message: String::new(),
        },
        None => TodoListResponse {
            ok: false,
            rows: Vec::new(),
            data_file: String::new(),
            message: "todo session is not open".to_string(),
        },
    }
}

/// Appends `text` exactly as typed.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(text: String) -> TodoActionResponse {
    match with_session(|session| Ok(session.append(text))) {
        Ok(report) => TodoActionResponse::applied(report),
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Handles a row tap and returns the edit request.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_tap(position: u32) -> TodoEditResponse {
    let outcome = with_session(|session| {
        session
            .handle_row_event(RowEvent::Tap {
                position: position as usize,
            })
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(RowOutcome::EditRequested(request)) => TodoEditResponse {
            ok: true,
            position,
            item_id: Some(request.item_id.to_string()),
            text: request.text,
            message: String::new(),
        },
        Ok(other) => edit_failure(position, format!("todo_tap unexpected outcome: {other:?}")),
        Err(err) => edit_failure(position, format!("todo_tap failed: {err}")),
    }
}

/// Applies text returned by the edit surface.
///
/// `item_id` is the id from [`todo_tap`]; when set, the row must still hold it.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit_commit(
    position: u32,
    item_id: Option<String>,
    text: String,
) -> TodoActionResponse {
    let item_id = match item_id.as_deref().map(parse_item_id).transpose() {
        Ok(item_id) => item_id,
        Err(err) => {
            return TodoActionResponse::failure(format!("todo_edit_commit failed: {err}"));
        }
    };
    let result = EditResult::Saved {
        position: position as usize,
        item_id,
        text,
    };
    finish_edit(result, "todo_edit_commit")
}

/// Reports a dismissed edit surface; the list is unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit_cancel() -> TodoActionResponse {
    finish_edit(EditResult::Cancelled, "todo_edit_cancel")
}

/// Handles a row long-press, deleting the row.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_long_press(position: u32) -> TodoActionResponse {
    let outcome = with_session(|session| {
        session
            .handle_row_event(RowEvent::LongPress {
                position: position as usize,
            })
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(RowOutcome::Removed(report)) => TodoActionResponse::applied(report),
        Ok(other) => {
            TodoActionResponse::failure(format!("todo_long_press unexpected outcome: {other:?}"))
        }
        Err(err) => TodoActionResponse::failure(format!("todo_long_press failed: {err}")),
    }
}

/// Drains change notifications queued since the last call.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_take_changes() -> Vec<TodoChange> {
    with_session(|session| Ok(session.observer_mut().take()))
        .map(|changes| changes.into_iter().map(to_todo_change).collect())
        .unwrap_or_default()
}

fn finish_edit(result: EditResult, op: &str) -> TodoActionResponse {
    let outcome = with_session(|session| {
        session
            .finish_edit(result)
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(Some(report)) => TodoActionResponse::applied(report),
        Ok(None) => TodoActionResponse::unchanged("Edit cancelled."),
        Err(err) => TodoActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn edit_failure(position: u32, message: String) -> TodoEditResponse {
    TodoEditResponse {
        ok: false,
        position,
        item_id: None,
        text: String::new(),
        message,
    }
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, String>) -> Result<T, String> {
    let mut guard = lock_session();
    let session = guard
        .as_mut()
        .ok_or_else(|| "todo session is not open".to_string())?;
    f(session)
}

fn resolve_data_dir(explicit: Option<&str>) -> PathBuf {
    if let Some(dir) = non_empty(explicit) {
        return PathBuf::from(dir);
    }
    if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
        if let Some(dir) = non_empty(Some(raw.as_str())) {
            return PathBuf::from(dir);
        }
    }
    std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_item_id(raw: &str) -> Result<ItemId, String> {
    raw.trim()
        .parse::<ItemId>()
        .map_err(|err| format!("invalid item_id `{raw}`: {err}"))
}

fn session_rows(session: &Session) -> Vec<TodoRow> {
    session.rows().into_iter().map(to_todo_row).collect()
}

fn to_todo_row(row: Row) -> TodoRow {
    TodoRow {
        position: to_wire_position(row.position),
        item_id: row.item_id.to_string(),
        text: row.text,
    }
}

fn to_todo_change(change: ListChange) -> TodoChange {
    TodoChange {
        kind: change.kind().to_string(),
        position: to_wire_position(change.position()),
    }
}

/// Positions past `u32::MAX` saturate instead of wrapping.
fn to_wire_position(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}

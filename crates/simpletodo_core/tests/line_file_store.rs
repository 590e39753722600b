use simpletodo_core::{
    LineFileStore, LineStore, ListChange, RecordingObserver, RowEvent, RowOutcome, TodoController,
};
use std::fs;

#[test]
fn load_missing_file_yields_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = LineFileStore::in_dir(dir.path());
    assert!(store.load().is_empty());
}

#[test]
fn save_then_load_roundtrips_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LineFileStore::in_dir(dir.path());
    let lines = vec![
        "buy milk".to_string(),
        String::new(),
        "  padded  ".to_string(),
        "naïve ünïcode ✓".to_string(),
        String::new(),
    ];
    store.save(&lines).unwrap();
    assert_eq!(store.load(), lines);
}

#[test]
fn trailing_carriage_return_is_dropped_on_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LineFileStore::in_dir(dir.path());
    store
        .save(&["a\r".to_string(), "b\rc".to_string()])
        .unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "a\r\nb\rc\n");
    assert_eq!(store.load(), vec!["a", "b\rc"]);
}

#[test]
fn unreadable_file_recovers_to_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = LineFileStore::in_dir(dir.path());
    fs::write(store.path(), [0xff_u8, 0xfe, 0x00, b'\n']).unwrap();
    assert!(store.load().is_empty());
    assert!(store.read_lines().is_err());
}

#[test]
fn directory_in_place_of_file_fails_save_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("data.txt");
    fs::create_dir(&store_path).unwrap();

    let mut todo = TodoController::open(LineFileStore::new(&store_path), RecordingObserver::new());
    assert!(todo.is_empty());
    let report = todo.append("still here");
    assert!(!report.persisted);
    assert_eq!(todo.items().snapshot(), vec!["still here"]);
}

#[test]
fn session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut todo =
            TodoController::open(LineFileStore::in_dir(dir.path()), RecordingObserver::new());
        todo.append("a");
        todo.append("b");
        todo.append("c");
        todo.handle_row_event(RowEvent::LongPress { position: 1 })
            .unwrap();
        let request = match todo.handle_row_event(RowEvent::Tap { position: 0 }).unwrap() {
            RowOutcome::EditRequested(request) => request,
            other => panic!("unexpected outcome: {other:?}"),
        };
        todo.finish_edit(request.complete("A")).unwrap();

        assert_eq!(
            todo.observer_mut().take(),
            vec![
                ListChange::Inserted { position: 0 },
                ListChange::Inserted { position: 1 },
                ListChange::Inserted { position: 2 },
                ListChange::Removed { position: 1 },
                ListChange::Changed { position: 0 },
            ]
        );
    }

    let reopened =
        TodoController::open(LineFileStore::in_dir(dir.path()), RecordingObserver::new());
    assert_eq!(reopened.items().snapshot(), vec!["A", "c"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("data.txt")).unwrap(),
        "A\nc\n"
    );
}

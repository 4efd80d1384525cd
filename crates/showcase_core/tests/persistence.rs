use showcase_core::db::open_db;
use showcase_core::{
    DueTime, LocalStorage, LocalStorageTaskRepository, MemoryLocalStorage, SqliteLocalStorage,
    TaskRepository, TaskStore, TASKS_STORAGE_KEY,
};

fn clock() -> i64 {
    1_700_000_000_000
}

#[test]
fn hydrate_from_absent_key_is_empty() {
    let storage = MemoryLocalStorage::new();
    let store = TaskStore::hydrate_with_clock(LocalStorageTaskRepository::new(&storage), clock);
    assert!(store.is_empty());
    assert_eq!(storage.write_count(), 0, "hydration never writes");
}

#[test]
fn hydrate_from_corrupt_value_is_empty() {
    for corrupt in [
        "not json",
        "{\"id\":1}",
        "[{\"id\":\"one\",\"text\":\"a\",\"completed\":false}]",
        "[{\"id\":1,\"text\":\"a\",\"dueDate\":\"noon\",\"completed\":false}]",
        "[{\"id\":1,\"text\":\"a\"},{\"id\":1,\"text\":\"b\"}]",
    ] {
        let storage = MemoryLocalStorage::new();
        storage.set_item(TASKS_STORAGE_KEY, corrupt).unwrap();

        let store =
            TaskStore::hydrate_with_clock(LocalStorageTaskRepository::new(&storage), clock);
        assert!(store.is_empty(), "`{corrupt}` should hydrate as empty");
    }
}

#[test]
fn hydrate_accepts_snapshots_with_empty_due_dates() {
    let storage = MemoryLocalStorage::new();
    storage
        .set_item(
            TASKS_STORAGE_KEY,
            r#"[
                {"id":1700000000001,"text":"Walk dog","dueDate":"","completed":false},
                {"id":1700000000002,"text":"Buy milk","dueDate":"08:00","completed":true}
            ]"#,
        )
        .unwrap();

    let store = TaskStore::hydrate_with_clock(LocalStorageTaskRepository::new(&storage), clock);

    assert_eq!(store.len(), 2);
    assert_eq!(store.tasks()[0].due_date, None);
    assert_eq!(store.tasks()[1].due_date, DueTime::from_hm(8, 0));
    assert!(store.tasks()[1].completed);
}

#[test]
fn persist_then_hydrate_round_trips() {
    let storage = MemoryLocalStorage::new();
    let mut store = TaskStore::hydrate_with_clock(LocalStorageTaskRepository::new(&storage), clock);
    let a = store.add("a", DueTime::from_hm(7, 5)).unwrap();
    store.add("b", None).unwrap();
    store.add("c", DueTime::from_hm(23, 59)).unwrap();
    store.toggle_completion(a);
    store.reorder(0, Some(2));
    let expected = store.tasks().to_vec();
    drop(store);

    let rehydrated =
        TaskStore::hydrate_with_clock(LocalStorageTaskRepository::new(&storage), clock);
    assert_eq!(rehydrated.tasks(), expected.as_slice());
}

#[test]
fn persisted_layout_uses_camel_case_records() {
    let storage = MemoryLocalStorage::new();
    let mut store = TaskStore::hydrate_with_clock(LocalStorageTaskRepository::new(&storage), clock);
    store.add("Buy milk", DueTime::from_hm(8, 0)).unwrap();
    store.add("Call mom", None).unwrap();

    let raw = storage.get_item(TASKS_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"id": 1_700_000_000_000_i64, "text": "Buy milk", "dueDate": "08:00", "completed": false},
            {"id": 1_700_000_000_001_i64, "text": "Call mom", "completed": false}
        ])
    );
}

#[test]
fn sqlite_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("local_storage.sqlite3");

    let id = {
        let conn = open_db(&path).unwrap();
        let mut store = TaskStore::hydrate_with_clock(
            LocalStorageTaskRepository::new(SqliteLocalStorage::new(&conn)),
            clock,
        );
        let id = store.add("durable", DueTime::from_hm(12, 0)).unwrap();
        store.toggle_completion(id);
        id
    };

    let conn = open_db(&path).unwrap();
    let repo = LocalStorageTaskRepository::new(SqliteLocalStorage::new(&conn));
    let tasks = repo.load_tasks().unwrap().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].text, "durable");
    assert!(tasks[0].completed);
}

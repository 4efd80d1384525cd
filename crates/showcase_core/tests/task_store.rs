use showcase_core::{
    DueTime, LocalStorage, LocalStorageTaskRepository, MemoryLocalStorage, StorageError,
    StorageResult, Task, TaskFilter, TaskRepository, TaskStore, TASKS_STORAGE_KEY,
};
use std::cell::Cell;

fn clock() -> i64 {
    1_700_000_000_000
}

fn open_store(
    storage: &MemoryLocalStorage,
) -> TaskStore<LocalStorageTaskRepository<&MemoryLocalStorage>> {
    TaskStore::hydrate_with_clock(LocalStorageTaskRepository::new(storage), clock)
}

fn ids<R: TaskRepository>(store: &TaskStore<R>) -> Vec<i64> {
    store.tasks().iter().map(|task| task.id).collect()
}

#[test]
fn blank_text_is_rejected_without_persisting() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);

    assert_eq!(store.add("", None), None);
    assert_eq!(store.add("   \t\n", DueTime::from_hm(8, 0)), None);

    assert!(store.is_empty());
    assert_eq!(storage.write_count(), 0);
}

#[test]
fn add_appends_pending_task_at_the_end() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);
    store.add("first", None).unwrap();

    let due = DueTime::from_hm(17, 45);
    let id = store.add("second", due).unwrap();

    assert_eq!(store.len(), 2);
    let last = store.tasks().last().unwrap();
    assert_eq!(last.id, id);
    assert_eq!(last.text, "second");
    assert_eq!(last.due_date, due);
    assert!(!last.completed);
}

#[test]
fn every_mutation_writes_exactly_one_snapshot() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);

    let a = store.add("a", None).unwrap();
    assert_eq!(storage.write_count(), 1);
    let b = store.add("b", None).unwrap();
    assert_eq!(storage.write_count(), 2);

    store.edit(a, "a2");
    assert_eq!(storage.write_count(), 3);
    store.toggle_completion(b);
    assert_eq!(storage.write_count(), 4);
    store.reorder(0, Some(1));
    assert_eq!(storage.write_count(), 5);
    store.delete(a);
    assert_eq!(storage.write_count(), 6);
}

#[test]
fn persisted_snapshot_matches_memory_after_each_mutation() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);

    let a = store.add("a", None).unwrap();
    store.add("b", DueTime::from_hm(6, 30)).unwrap();
    store.toggle_completion(a);
    store.reorder(1, Some(0));

    let snapshot = LocalStorageTaskRepository::new(&storage)
        .load_tasks()
        .unwrap()
        .unwrap();
    assert_eq!(snapshot, store.tasks());
}

#[test]
fn edit_replaces_text_only() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);
    let a = store.add("a", DueTime::from_hm(9, 0)).unwrap();
    let b = store.add("b", None).unwrap();
    store.toggle_completion(a);

    assert!(store.edit(a, ""));

    let edited = store.get(a).unwrap();
    assert_eq!(edited.text, "");
    assert_eq!(edited.due_date, DueTime::from_hm(9, 0));
    assert!(edited.completed);
    assert_eq!(ids(&store), vec![a, b]);
}

#[test]
fn unknown_ids_are_silent_no_ops() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);
    store.add("a", None).unwrap();
    let before = store.tasks().to_vec();

    assert!(!store.edit(404, "x"));
    assert!(!store.toggle_completion(404));
    assert!(!store.delete(404));

    assert_eq!(store.tasks(), before.as_slice());
    assert!(store.last_persist_error().is_none());
}

#[test]
fn double_toggle_restores_completion() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);
    let id = store.add("a", None).unwrap();

    store.toggle_completion(id);
    assert!(store.get(id).unwrap().completed);
    store.toggle_completion(id);
    assert!(!store.get(id).unwrap().completed);
}

#[test]
fn second_delete_is_a_no_op() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);
    let a = store.add("a", None).unwrap();
    let b = store.add("b", None).unwrap();

    assert!(store.delete(a));
    let after_first = store.tasks().to_vec();
    assert!(!store.delete(a));
    assert_eq!(store.tasks(), after_first.as_slice());
    assert_eq!(ids(&store), vec![b]);
}

#[test]
fn reorder_moves_single_element_and_inverse_restores_order() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);
    let original: Vec<i64> = ["a", "b", "c", "d", "e"]
        .into_iter()
        .map(|text| store.add(text, None).unwrap())
        .collect();

    store.reorder(1, Some(3));
    assert_eq!(
        ids(&store),
        vec![original[0], original[2], original[3], original[1], original[4]]
    );

    for (i, j) in [(3, 1), (0, 4), (4, 0), (2, 3)] {
        let before = ids(&store);
        store.reorder(i, Some(j));
        store.reorder(j, Some(i));
        assert_eq!(ids(&store), before, "reorder({i}, {j}) then reorder({j}, {i})");
    }
}

#[test]
fn filtered_views_partition_the_list_in_order() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);
    let created: Vec<i64> = (0..6)
        .map(|n| store.add(format!("task {n}"), None).unwrap())
        .collect();
    for id in [created[1], created[2], created[5]] {
        store.toggle_completion(id);
    }
    let order_before = ids(&store);

    let completed: Vec<i64> = store
        .filtered_view(TaskFilter::Completed)
        .iter()
        .map(|task| task.id)
        .collect();
    let pending: Vec<i64> = store
        .filtered_view(TaskFilter::Pending)
        .iter()
        .map(|task| task.id)
        .collect();
    let all: Vec<&Task> = store.filtered_view(TaskFilter::All);

    assert_eq!(completed, vec![created[1], created[2], created[5]]);
    assert_eq!(pending, vec![created[0], created[3], created[4]]);
    assert_eq!(completed.len() + pending.len(), store.len());
    assert_eq!(all.len(), store.len());
    assert_eq!(ids(&store), order_before);
}

#[test]
fn buy_milk_scenario() {
    let storage = MemoryLocalStorage::new();
    let mut store = open_store(&storage);

    let id = store
        .add("Buy milk", Some("08:00".parse().unwrap()))
        .unwrap();
    assert_eq!(store.len(), 1);
    let task = &store.tasks()[0];
    assert_eq!(task.text, "Buy milk");
    assert_eq!(task.due_date.map(|due| due.to_string()).as_deref(), Some("08:00"));
    assert!(!task.completed);

    store.toggle_completion(id);
    assert!(store.get(id).unwrap().completed);

    assert!(store.filtered_view(TaskFilter::Pending).is_empty());

    store.delete(id);
    assert!(store.is_empty());
    assert_eq!(storage.get_item(TASKS_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

struct FailingRepository {
    attempts: Cell<usize>,
}

impl TaskRepository for FailingRepository {
    fn load_tasks(&self) -> StorageResult<Option<Vec<Task>>> {
        Ok(None)
    }

    fn save_tasks(&self, _tasks: &[Task]) -> StorageResult<()> {
        self.attempts.set(self.attempts.get() + 1);
        Err(StorageError::InvalidData("disk full".to_string()))
    }
}

#[test]
fn write_failures_keep_memory_authoritative() {
    let repo = FailingRepository {
        attempts: Cell::new(0),
    };
    let mut store = TaskStore::hydrate_with_clock(repo, clock);

    let id = store.add("still here", None).expect("add never fails");
    assert_eq!(store.len(), 1);
    assert!(matches!(
        store.last_persist_error(),
        Some(StorageError::InvalidData(_))
    ));

    store.toggle_completion(id);
    assert!(store.get(id).unwrap().completed);
    assert_eq!(store.repository().attempts.get(), 2);
}

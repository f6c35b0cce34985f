use rusqlite::Connection;
use tasklist_core::{RepoError, StoreConfig, StoreError, Task, TaskStore};
use uuid::Uuid;

#[test]
fn create_then_list_returns_the_created_task() {
    let mut store = TaskStore::open_in_memory().unwrap();

    let created = store.create("Water plants").unwrap();
    let listed = store.list().unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].title, "Water plants");
}

#[test]
fn list_follows_insertion_order() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let titles = ["first", "second", "third"];
    for title in titles {
        store.create(title).unwrap();
    }

    let listed: Vec<_> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(listed, titles);
}

#[test]
fn titles_are_stored_verbatim_without_validation() {
    let mut store = TaskStore::open_in_memory().unwrap();

    let empty = store.create("").unwrap();
    let padded = store.create("  spaced  ").unwrap();
    let duplicate = store.create("  spaced  ").unwrap();

    assert_eq!(store.get(empty.id).unwrap().unwrap().title, "");
    assert_eq!(store.get(padded.id).unwrap().unwrap().title, "  spaced  ");
    assert_ne!(padded.id, duplicate.id);
    assert_eq!(store.list().unwrap().len(), 3);
}

#[test]
fn update_changes_title_and_keeps_identity() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let task = store.create("draft").unwrap();

    let updated = store.update(&task, "final").unwrap();

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.title, "final");
    assert_eq!(store.list().unwrap(), vec![updated]);
}

#[test]
fn repeated_update_with_same_title_is_idempotent() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let task = store.create("before").unwrap();

    store.update(&task, "after").unwrap();
    let once = store.list().unwrap();
    store.update(&task, "after").unwrap();
    let twice = store.list().unwrap();

    assert_eq!(once, twice);
}

#[test]
fn deleted_task_never_reappears() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let keep = store.create("keep").unwrap();
    let gone = store.create("gone").unwrap();

    store.delete(&gone).unwrap();

    for _ in 0..3 {
        let listed = store.list().unwrap();
        assert!(listed.iter().all(|task| task.id != gone.id));
        assert_eq!(listed, vec![keep.clone()]);
    }
    assert!(store.get(gone.id).unwrap().is_none());
}

#[test]
fn writes_against_missing_task_return_not_found() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let ghost = Task::with_id(Uuid::new_v4(), "ghost");

    let update_err = store.update(&ghost, "still ghost").unwrap_err();
    assert!(matches!(update_err, StoreError::Write(RepoError::NotFound(id)) if id == ghost.id));

    let delete_err = store.delete(&ghost).unwrap_err();
    assert!(delete_err.is_not_found());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn buy_milk_lifecycle() {
    let mut store = TaskStore::open_in_memory().unwrap();

    let task = store.create("Buy milk").unwrap();
    assert_eq!(titles(&store), vec!["Buy milk"]);

    let task = store.update(&task, "Buy milk and eggs").unwrap();
    assert_eq!(titles(&store), vec!["Buy milk and eggs"]);

    store.delete(&task).unwrap();
    assert!(titles(&store).is_empty());

    store.close().unwrap();
}

#[test]
fn committed_writes_survive_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::file(dir.path().join("tasks.sqlite3"));

    let mut store = TaskStore::open(&config).unwrap();
    let kept = store.create("persisted").unwrap();
    let removed = store.create("removed").unwrap();
    let kept = store.update(&kept, "persisted and renamed").unwrap();
    store.delete(&removed).unwrap();
    store.close().unwrap();

    let reopened = TaskStore::open(&config).unwrap();
    assert_eq!(reopened.list().unwrap(), vec![kept]);
}

#[test]
fn writes_are_visible_to_another_connection_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let mut store = TaskStore::open(&StoreConfig::file(&path)).unwrap();

    store.create("flushed").unwrap();

    let observer = Connection::open(&path).unwrap();
    let count: i64 = observer
        .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn corrupted_row_surfaces_as_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let store = TaskStore::open(&StoreConfig::file(&path)).unwrap();

    let tamper = Connection::open(&path).unwrap();
    tamper
        .execute(
            "INSERT INTO tasks (uuid, title) VALUES ('garbage', 'bad row');",
            [],
        )
        .unwrap();

    let err = store.list().unwrap_err();
    assert!(matches!(err, StoreError::Read(RepoError::InvalidData(_))));
}

#[test]
fn open_rejects_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = TaskStore::open(&StoreConfig::file(&path)).err().unwrap();
    assert!(matches!(err, StoreError::Open(RepoError::Db(_))));
}

fn titles(store: &TaskStore) -> Vec<String> {
    store
        .list()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect()
}

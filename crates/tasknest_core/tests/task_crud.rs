use rusqlite::Connection;
use tasknest_core::db::open_db_in_memory;
use tasknest_core::{
    SqliteTaskRepository, Task, TaskPatch, TaskRepository, TaskService, TaskStoreError, UserId,
};
use uuid::Uuid;

fn service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>> {
    TaskService::new(SqliteTaskRepository::new(conn))
}

fn owner(value: &str) -> UserId {
    UserId::new(value)
}

#[test]
fn create_returns_persisted_task_with_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let caller = owner("user-a");

    let task = store.create_task(Some(&caller), "Buy milk").unwrap();

    assert_eq!(task.title, "Buy milk");
    assert!(!task.completed);
    assert_eq!(task.owner_id, caller);
    assert!(task.created_at > 0);

    let listed = store.list_tasks(Some(&caller)).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], task);
}

#[test]
fn create_rejects_empty_and_whitespace_titles() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let caller = owner("user-a");

    let empty = store.create_task(Some(&caller), "").unwrap_err();
    assert!(matches!(empty, TaskStoreError::Validation(_)));

    let blank = store.create_task(Some(&caller), "   ").unwrap_err();
    assert!(matches!(blank, TaskStoreError::Validation(_)));

    assert!(store.list_tasks(Some(&caller)).unwrap().is_empty());
}

#[test]
fn unauthenticated_callers_cannot_list_or_create() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);

    let list_err = store.list_tasks(None).unwrap_err();
    assert!(matches!(list_err, TaskStoreError::Unauthorized));

    let create_err = store.create_task(None, "Buy milk").unwrap_err();
    assert!(matches!(create_err, TaskStoreError::Unauthorized));
}

#[test]
fn list_is_empty_for_owner_without_tasks() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);

    let listed = store.list_tasks(Some(&owner("nobody-yet"))).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn list_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let store = service(&conn);
    let caller = owner("user-a");

    for (title, created_at) in [("t1", 1_000), ("t2", 2_000), ("t3", 3_000)] {
        let mut task = Task::new(caller.clone(), title);
        task.created_at = created_at;
        repo.insert_task(&task).unwrap();
    }

    let listed = store.list_tasks(Some(&caller)).unwrap();
    let titles: Vec<&str> = listed.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["t3", "t2", "t1"]);
}

#[test]
fn same_instant_creates_order_newest_insertion_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let store = service(&conn);
    let caller = owner("user-a");

    for title in ["first", "second", "third"] {
        let mut task = Task::new(caller.clone(), title);
        task.created_at = 5_000;
        repo.insert_task(&task).unwrap();
    }

    let listed = store.list_tasks(Some(&caller)).unwrap();
    let titles: Vec<&str> = listed.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[test]
fn update_applies_only_present_patch_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let caller = owner("user-a");
    let task = store.create_task(Some(&caller), "draft").unwrap();

    let toggled = store
        .update_task(Some(&caller), task.id, &TaskPatch::completed(true))
        .unwrap();
    assert_eq!(toggled.title, "draft");
    assert!(toggled.completed);

    let retitled = store
        .update_task(Some(&caller), task.id, &TaskPatch::title("final"))
        .unwrap();
    assert_eq!(retitled.title, "final");
    assert!(retitled.completed);

    let untouched = store
        .update_task(Some(&caller), task.id, &TaskPatch::default())
        .unwrap();
    assert_eq!(untouched.title, "final");
    assert!(untouched.completed);
    assert_eq!(untouched.owner_id, caller);
    assert_eq!(untouched.created_at, task.created_at);
}

#[test]
fn update_rejects_blank_patch_title() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let caller = owner("user-a");
    let task = store.create_task(Some(&caller), "keep me").unwrap();

    let err = store
        .update_task(Some(&caller), task.id, &TaskPatch::title("   "))
        .unwrap_err();
    assert!(matches!(err, TaskStoreError::Validation(_)));

    let listed = store.list_tasks(Some(&caller)).unwrap();
    assert_eq!(listed[0].title, "keep me");
}

#[test]
fn repeated_completion_update_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let caller = owner("user-a");
    let task = store.create_task(Some(&caller), "once").unwrap();

    let first = store
        .update_task(Some(&caller), task.id, &TaskPatch::completed(true))
        .unwrap();
    let second = store
        .update_task(Some(&caller), task.id, &TaskPatch::completed(true))
        .unwrap();

    assert_eq!(first, second);
    let listed = store.list_tasks(Some(&caller)).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].completed);
}

#[test]
fn update_unknown_id_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let caller = owner("user-a");
    let unknown = Uuid::new_v4();

    let err = store
        .update_task(Some(&caller), unknown, &TaskPatch::completed(true))
        .unwrap_err();
    assert!(matches!(err, TaskStoreError::NotFound(id) if id == unknown));
}

#[test]
fn delete_is_permanent_and_second_delete_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let caller = owner("user-a");
    let task = store.create_task(Some(&caller), "short-lived").unwrap();

    store.delete_task(Some(&caller), task.id).unwrap();

    let listed = store.list_tasks(Some(&caller)).unwrap();
    assert!(listed.iter().all(|remaining| remaining.id != task.id));

    let err = store.delete_task(Some(&caller), task.id).unwrap_err();
    assert!(matches!(err, TaskStoreError::NotFound(id) if id == task.id));
}

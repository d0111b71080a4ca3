//! Unit tests for `TaskRepo` CRUD operations against `SQLite`.

use std::sync::Arc;

use reply_bot::persistence::task_repo::TaskRepo;
use reply_bot::persistence::{db, TaskStore};

async fn memory_repo() -> TaskRepo {
    let db = db::connect_memory().await.expect("db");
    TaskRepo::new(Arc::new(db))
}

#[tokio::test]
async fn empty_table_lists_nothing() {
    let repo = memory_repo().await;
    assert!(repo.list_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn insert_returns_increasing_ids() {
    let repo = memory_repo().await;
    let first = repo.insert("Report", "2/24").await.expect("insert");
    let second = repo.insert("Laundry", "3/1").await.expect("insert");
    assert!(second > first);
}

#[tokio::test]
async fn list_returns_rows_in_insertion_order() {
    let repo = memory_repo().await;
    let a = repo.insert("Report", "2/24").await.expect("insert");
    let b = repo.insert("Laundry", "3/1").await.expect("insert");

    let tasks = repo.list_all().await.expect("list");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, a);
    assert_eq!(tasks[0].title, "Report");
    assert_eq!(tasks[0].due_date, "2/24");
    assert_eq!(tasks[1].id, b);
    assert_eq!(tasks[1].title, "Laundry");
}

#[tokio::test]
async fn delete_removes_only_target() {
    let repo = memory_repo().await;
    let a = repo.insert("Report", "2/24").await.expect("insert");
    let b = repo.insert("Laundry", "3/1").await.expect("insert");

    repo.delete_by_id(a).await.expect("delete");

    let tasks = repo.list_all().await.expect("list");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, b);
}

#[tokio::test]
async fn delete_unknown_id_succeeds() {
    let repo = memory_repo().await;
    repo.delete_by_id(12345).await.expect("delete is silent");
}

#[tokio::test]
async fn delete_id_beyond_integer_range_succeeds() {
    let repo = memory_repo().await;
    let kept = repo.insert("Report", "2/24").await.expect("insert");

    repo.delete_by_id(u64::MAX).await.expect("delete is silent");
    repo.delete_by_id(1 << 63).await.expect("delete is silent");

    let tasks = repo.list_all().await.expect("list");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, kept);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let repo = memory_repo().await;
    let a = repo.insert("Report", "2/24").await.expect("insert");
    repo.delete_by_id(a).await.expect("delete");
    let b = repo.insert("Laundry", "3/1").await.expect("insert");
    assert_ne!(a, b);
}

#[tokio::test]
async fn trait_object_delegates_to_repo() {
    let store: Arc<dyn TaskStore> = Arc::new(memory_repo().await);
    let id = store.insert("Report", "2/24").await.expect("insert");
    let tasks = store.list_all().await.expect("list");
    assert_eq!(tasks[0].id, id);
    store.delete_by_id(id).await.expect("delete");
    assert!(store.list_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn on_disk_database_persists_across_connections() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("tasks.db");

    let id = {
        let repo = TaskRepo::new(Arc::new(db::connect(&path).await.expect("connect")));
        repo.insert("Report", "2/24").await.expect("insert")
    };

    let repo = TaskRepo::new(Arc::new(db::connect(&path).await.expect("reconnect")));
    let tasks = repo.list_all().await.expect("list");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
}

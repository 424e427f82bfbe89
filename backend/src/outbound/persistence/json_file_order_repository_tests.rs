//! Tests for the JSON file order repository.

use std::path::Path;
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use chrono::{TimeZone, Utc};
use futures::future::join_all;
use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;

use super::*;
use crate::domain::{OrderChange, OrderDraft, OrderItem, OrderStatus};

#[fixture]
fn data_dir() -> TempDir {
    tempfile::tempdir().expect("temp dir")
}

fn open_repo(dir: &TempDir) -> JsonFileOrderRepository {
    JsonFileOrderRepository::open(dir.path()).expect("repository opens")
}

fn order(id: &str, product: &str, quantity: i64) -> Order {
    Order::open(
        OrderId::new(id),
        OrderDraft {
            customer_name: None,
            items: vec![OrderItem::new(product, quantity)],
        },
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    )
}

fn write_raw(dir: &Path, contents: &str) {
    Dir::open_ambient_dir(dir, ambient_authority())
        .expect("open data dir")
        .write(ORDERS_FILE, contents)
        .expect("write raw store");
}

fn read_raw(dir: &Path) -> String {
    Dir::open_ambient_dir(dir, ambient_authority())
        .expect("open data dir")
        .read_to_string(ORDERS_FILE)
        .expect("read raw store")
}

fn ids(orders: &[Order]) -> Vec<&str> {
    orders.iter().map(|order| order.id.as_str()).collect()
}

#[rstest]
#[tokio::test]
async fn missing_file_is_an_empty_set(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    assert!(repo.list().await.expect("list succeeds").is_empty());
    assert!(!repo.file_path().exists());
}

#[rstest]
#[case("")]
#[case("  \n")]
#[case("null")]
#[case("[]")]
#[tokio::test]
async fn blank_stores_are_empty(data_dir: TempDir, #[case] contents: &str) {
    write_raw(data_dir.path(), contents);
    let repo = open_repo(&data_dir);
    assert!(repo.list().await.expect("list succeeds").is_empty());
}

#[rstest]
#[case("{ not json")]
#[case(r#"{"id": "o-1"}"#)]
#[case(r#"[{"id": "o-1", "items": [], "status": "pending", "created_at": "2024-01-01T00:00:00Z"}]"#)]
#[tokio::test]
async fn malformed_content_is_corrupt(data_dir: TempDir, #[case] contents: &str) {
    write_raw(data_dir.path(), contents);
    let repo = open_repo(&data_dir);

    let err = repo.list().await.expect_err("decode fails");
    assert!(matches!(err, OrderRepositoryError::Corrupt { .. }));

    let err = repo
        .create(&order("o-2", "latte", 1))
        .await
        .expect_err("writes refuse to clobber a corrupt store");
    assert!(matches!(err, OrderRepositoryError::Corrupt { .. }));
    assert_eq!(read_raw(data_dir.path()), contents);
}

#[rstest]
#[tokio::test]
async fn unreadable_store_is_an_io_error(data_dir: TempDir) {
    Dir::open_ambient_dir(data_dir.path(), ambient_authority())
        .expect("open data dir")
        .create_dir(ORDERS_FILE)
        .expect("directory in place of the store");
    let repo = open_repo(&data_dir);

    let err = repo.list().await.expect_err("a directory is not a store");
    assert!(matches!(err, OrderRepositoryError::Io { .. }));

    let err = repo
        .create(&order("o-1", "latte", 1))
        .await
        .expect_err("create cannot read the store");
    assert!(matches!(err, OrderRepositoryError::Io { .. }));
}

#[rstest]
#[tokio::test]
async fn rewrites_keep_stored_timestamps_verbatim(data_dir: TempDir) {
    write_raw(
        data_dir.path(),
        r#"[
  {"id": "a", "items": [{"product_id": "latte", "quantity": 1}], "status": "open", "created_at": "2024-05-01T10:00:00+02:00"},
  {"id": "b", "items": [{"product_id": "mocha", "quantity": 1}], "status": "closed", "created_at": "legacy"}
]"#,
    );
    let repo = open_repo(&data_dir);
    repo.create(&order("c", "chai", 1)).await.expect("create");

    let value: Value = serde_json::from_str(&read_raw(data_dir.path())).expect("store is JSON");
    assert_eq!(value[0]["created_at"], "2024-05-01T10:00:00+02:00");
    assert_eq!(value[1]["created_at"], "legacy");
    assert_eq!(value[2]["created_at"], "2024-03-09T12:00:00Z");
}

#[rstest]
#[tokio::test]
async fn open_creates_the_data_directory(data_dir: TempDir) {
    let nested = data_dir.path().join("var").join("orders");
    let repo = JsonFileOrderRepository::open(&nested).expect("repository opens");
    repo.create(&order("o-1", "latte", 1))
        .await
        .expect("create succeeds");
    assert!(nested.join(ORDERS_FILE).exists());
}

#[rstest]
#[tokio::test]
async fn create_appends_in_insertion_order(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    for (id, product) in [("a", "latte"), ("b", "mocha"), ("c", "chai")] {
        repo.create(&order(id, product, 1))
            .await
            .expect("create succeeds");
    }

    let orders = repo.list().await.expect("list succeeds");
    assert_eq!(ids(&orders), vec!["a", "b", "c"]);
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_ids(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    repo.create(&order("a", "latte", 1))
        .await
        .expect("first create");

    let err = repo
        .create(&order("a", "mocha", 2))
        .await
        .expect_err("duplicate rejected");
    assert_eq!(err, OrderRepositoryError::duplicate_id("a"));
    assert_eq!(repo.list().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn store_is_a_pretty_printed_array(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    repo.create(&order("a", "latte", 2))
        .await
        .expect("create succeeds");

    let raw = read_raw(data_dir.path());
    assert!(raw.starts_with("[\n  {"));
    let value: Value = serde_json::from_str(&raw).expect("store is JSON");
    assert_eq!(value[0]["id"], "a");
    assert_eq!(value[0]["status"], "open");
    assert_eq!(value[0]["created_at"], "2024-03-09T12:00:00Z");
    assert_eq!(value[0]["items"][0]["product_id"], "latte");
    assert_eq!(value[0]["items"][0]["quantity"], 2);
}

#[rstest]
#[tokio::test]
async fn writes_leave_no_staged_files(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    repo.create(&order("a", "latte", 1)).await.expect("create");
    repo.delete(&OrderId::new("a")).await.expect("delete");

    let dir = Dir::open_ambient_dir(data_dir.path(), ambient_authority()).expect("open");
    let names: Vec<String> = dir
        .entries()
        .expect("list entries")
        .map(|entry| {
            entry
                .expect("entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec![ORDERS_FILE.to_owned()]);
}

#[rstest]
#[tokio::test]
async fn find_by_id_returns_the_stored_order(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    let stored = order("b", "flat-white", 3);
    repo.create(&order("a", "latte", 1)).await.expect("create a");
    repo.create(&stored).await.expect("create b");

    let found = repo
        .find_by_id(&OrderId::new("b"))
        .await
        .expect("lookup succeeds");
    assert_eq!(found, stored);

    let err = repo
        .find_by_id(&OrderId::new("zz"))
        .await
        .expect_err("missing order");
    assert_eq!(err, OrderRepositoryError::not_found("zz"));
}

#[rstest]
#[tokio::test]
async fn update_replaces_in_place(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    for id in ["a", "b", "c"] {
        repo.create(&order(id, "latte", 1)).await.expect("create");
    }

    let mut changed = order("b", "mocha", 5);
    changed.status = OrderStatus::Closed;
    repo.update(&changed).await.expect("update succeeds");

    let orders = repo.list().await.expect("list succeeds");
    assert_eq!(ids(&orders), vec!["a", "b", "c"]);
    assert_eq!(orders.get(1), Some(&changed));
}

#[rstest]
#[tokio::test]
async fn update_and_delete_report_missing_orders(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    repo.create(&order("a", "latte", 1)).await.expect("create");

    let err = repo
        .update(&order("ghost", "latte", 1))
        .await
        .expect_err("update of missing order");
    assert_eq!(err, OrderRepositoryError::not_found("ghost"));

    let err = repo
        .delete(&OrderId::new("ghost"))
        .await
        .expect_err("delete of missing order");
    assert_eq!(err, OrderRepositoryError::not_found("ghost"));
    assert_eq!(repo.list().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn modify_revises_in_place(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    for id in ["a", "b", "c"] {
        repo.create(&order(id, "latte", 1)).await.expect("create");
    }

    let revised = repo
        .modify(
            &OrderId::new("b"),
            OrderChange::Revise(OrderDraft {
                customer_name: Some("Grace".to_owned()),
                items: vec![OrderItem::new("mocha", 4)],
            }),
        )
        .await
        .expect("modify succeeds");

    assert_eq!(revised.items, vec![OrderItem::new("mocha", 4)]);
    assert_eq!(revised.status, OrderStatus::Open);
    let orders = repo.list().await.expect("list succeeds");
    assert_eq!(ids(&orders), vec!["a", "b", "c"]);
    assert_eq!(orders.get(1), Some(&revised));
}

#[rstest]
#[tokio::test]
async fn modify_closes_once(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    repo.create(&order("a", "latte", 1)).await.expect("create");
    let id = OrderId::new("a");

    let closed = repo
        .modify(&id, OrderChange::Close)
        .await
        .expect("first close");
    assert_eq!(closed.status, OrderStatus::Closed);
    let before = read_raw(data_dir.path());

    let err = repo
        .modify(&id, OrderChange::Close)
        .await
        .expect_err("second close");
    assert_eq!(err, OrderRepositoryError::already_closed("a"));
    assert_eq!(read_raw(data_dir.path()), before);

    let err = repo
        .modify(&OrderId::new("ghost"), OrderChange::Close)
        .await
        .expect_err("missing order");
    assert_eq!(err, OrderRepositoryError::not_found("ghost"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_revisions_never_reopen_a_closed_order(data_dir: TempDir) {
    let repo = Arc::new(open_repo(&data_dir));
    repo.create(&order("a", "latte", 1)).await.expect("create");
    let id = OrderId::new("a");

    let revisions = (1..=16).map(|quantity| {
        let repo = Arc::clone(&repo);
        let id = id.clone();
        tokio::spawn(async move {
            let draft = OrderDraft {
                customer_name: None,
                items: vec![OrderItem::new("latte", quantity)],
            };
            repo.modify(&id, OrderChange::Revise(draft)).await
        })
    });
    let close = {
        let repo = Arc::clone(&repo);
        let id = id.clone();
        tokio::spawn(async move { repo.modify(&id, OrderChange::Close).await })
    };

    for outcome in join_all(revisions).await {
        outcome.expect("task joins").expect("revision succeeds");
    }
    close.await.expect("task joins").expect("close succeeds");

    let stored = repo.find_by_id(&id).await.expect("lookup succeeds");
    assert_eq!(stored.status, OrderStatus::Closed);
}

#[rstest]
#[tokio::test]
async fn delete_removes_only_the_target(data_dir: TempDir) {
    let repo = open_repo(&data_dir);
    for id in ["a", "b", "c"] {
        repo.create(&order(id, "latte", 1)).await.expect("create");
    }

    repo.delete(&OrderId::new("b")).await.expect("delete succeeds");

    let orders = repo.list().await.expect("list succeeds");
    assert_eq!(ids(&orders), vec!["a", "c"]);
}

#[rstest]
#[tokio::test]
async fn reopening_sees_previous_writes(data_dir: TempDir) {
    open_repo(&data_dir)
        .create(&order("a", "latte", 1))
        .await
        .expect("create");

    let reopened = open_repo(&data_dir);
    assert_eq!(ids(&reopened.list().await.expect("list")), vec!["a"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_lose_no_writes(data_dir: TempDir) {
    let repo = Arc::new(open_repo(&data_dir));
    let writes = (0..32).map(|n| {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move { repo.create(&order(&format!("o-{n}"), "latte", 1)).await })
    });

    for outcome in join_all(writes).await {
        outcome.expect("task joins").expect("create succeeds");
    }

    let orders = repo.list().await.expect("list succeeds");
    assert_eq!(orders.len(), 32);
}

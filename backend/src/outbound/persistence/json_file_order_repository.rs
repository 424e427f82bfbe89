//! File-backed [`OrderRepository`] adapter.
//!
//! The whole order set lives in `orders.json` inside the data directory as a
//! pretty-printed JSON array. Every operation reads the full set, applies its
//! change in memory, and rewrites the full set while holding the repository's
//! lock. Writes go to a staged sibling file that is then renamed over
//! `orders.json`, so readers only ever see a complete snapshot.
//!
//! File access goes through a `cap_std` directory handle and runs on Tokio's
//! blocking pool.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{Order, OrderChange, OrderId};

/// Name of the order store inside the data directory.
pub const ORDERS_FILE: &str = "orders.json";

/// Order repository persisting to `<data dir>/orders.json`.
#[derive(Debug, Clone)]
pub struct JsonFileOrderRepository {
    data_dir: PathBuf,
    store: Arc<Mutex<Dir>>,
}

fn io_error(action: &str, error: &io::Error) -> OrderRepositoryError {
    OrderRepositoryError::io(format!("{action} {ORDERS_FILE}: {error}"))
}

fn read_orders(dir: &Dir) -> Result<Vec<Order>, OrderRepositoryError> {
    let contents = match dir.read_to_string(ORDERS_FILE) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(io_error("read", &error)),
    };
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Option<Vec<Order>>>(&contents)
        .map(Option::unwrap_or_default)
        .map_err(|error| OrderRepositoryError::corrupt(error.to_string()))
}

fn write_orders(dir: &Dir, orders: &[Order]) -> Result<(), OrderRepositoryError> {
    let mut payload = serde_json::to_vec_pretty(orders)
        .map_err(|error| OrderRepositoryError::io(format!("encode orders: {error}")))?;
    payload.push(b'\n');

    let staged = format!(".{ORDERS_FILE}.{}.tmp", Uuid::new_v4().simple());
    write_staged(dir, &staged, &payload)?;
    // On POSIX filesystems rename replaces the old snapshot atomically.
    if let Err(error) = dir.rename(&staged, dir, ORDERS_FILE) {
        drop(dir.remove_file(&staged));
        return Err(io_error("replace", &error));
    }
    sync_directory(dir);
    Ok(())
}

/// Write `payload` to a fresh staged file and flush it to disk.
///
/// The staged file is removed on every failure path.
fn write_staged(dir: &Dir, staged: &str, payload: &[u8]) -> Result<(), OrderRepositoryError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(staged, &options)
        .map_err(|error| io_error("stage", &error))?;

    if let Err(error) = file.write_all(payload).and_then(|()| file.sync_all()) {
        drop(file);
        drop(dir.remove_file(staged));
        return Err(io_error("stage", &error));
    }
    Ok(())
}

fn sync_directory(dir: &Dir) {
    // Best effort: the rename has already happened.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        debug!(file = ORDERS_FILE, "data directory sync failed");
    }
}

fn position_of(orders: &[Order], id: &OrderId) -> Result<usize, OrderRepositoryError> {
    orders
        .iter()
        .position(|order| &order.id == id)
        .ok_or_else(|| OrderRepositoryError::not_found(id.as_str()))
}

impl JsonFileOrderRepository {
    /// Open the store under `data_dir`, creating the directory when missing.
    ///
    /// The orders file itself is created lazily by the first write.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, OrderRepositoryError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        Dir::create_ambient_dir_all(&data_dir, ambient_authority()).map_err(|error| {
            OrderRepositoryError::io(format!("create {}: {error}", data_dir.display()))
        })?;
        let dir = Dir::open_ambient_dir(&data_dir, ambient_authority()).map_err(|error| {
            OrderRepositoryError::io(format!("open {}: {error}", data_dir.display()))
        })?;
        Ok(Self {
            data_dir,
            store: Arc::new(Mutex::new(dir)),
        })
    }

    /// Full path of the backing file.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(ORDERS_FILE)
    }

    /// Run `op` against the store while holding the exclusive lock.
    async fn with_store<T, F>(
        &self,
        operation: &'static str,
        op: F,
    ) -> Result<T, OrderRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, OrderRepositoryError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || {
            // The guarded handle carries no state a panicking holder could break.
            let dir = store.lock().unwrap_or_else(PoisonError::into_inner);
            op(&dir)
        })
        .await
        .map_err(|error| OrderRepositoryError::io(format!("{operation} task failed: {error}")))
        .and_then(|result| result);

        if let Err(error) = &result {
            debug!(
                operation,
                path = %self.file_path().display(),
                error = %error,
                "order store operation failed"
            );
        }
        result
    }
}

#[async_trait]
impl OrderRepository for JsonFileOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        let order = order.clone();
        self.with_store("create", move |dir| {
            let mut orders = read_orders(dir)?;
            if orders.iter().any(|existing| existing.id == order.id) {
                return Err(OrderRepositoryError::duplicate_id(order.id.as_str()));
            }
            orders.push(order);
            write_orders(dir, &orders)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        self.with_store("list", read_orders).await
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Order, OrderRepositoryError> {
        let id = id.clone();
        self.with_store("find_by_id", move |dir| {
            read_orders(dir)?
                .into_iter()
                .find(|order| order.id == id)
                .ok_or_else(|| OrderRepositoryError::not_found(id.as_str()))
        })
        .await
    }

    async fn update(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        let order = order.clone();
        self.with_store("update", move |dir| {
            let mut orders = read_orders(dir)?;
            let index = position_of(&orders, &order.id)?;
            if let Some(slot) = orders.get_mut(index) {
                *slot = order;
            }
            write_orders(dir, &orders)
        })
        .await
    }

    async fn modify(
        &self,
        id: &OrderId,
        change: OrderChange,
    ) -> Result<Order, OrderRepositoryError> {
        let id = id.clone();
        self.with_store("modify", move |dir| {
            let mut orders = read_orders(dir)?;
            let index = position_of(&orders, &id)?;
            let order = orders
                .get_mut(index)
                .ok_or_else(|| OrderRepositoryError::not_found(id.as_str()))?;
            order
                .apply(change)
                .map_err(|closed| OrderRepositoryError::already_closed(closed.id.as_str()))?;
            let changed = order.clone();
            write_orders(dir, &orders)?;
            Ok(changed)
        })
        .await
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderRepositoryError> {
        let id = id.clone();
        self.with_store("delete", move |dir| {
            let mut orders = read_orders(dir)?;
            let index = position_of(&orders, &id)?;
            orders.remove(index);
            write_orders(dir, &orders)
        })
        .await
    }
}

#[cfg(test)]
#[path = "json_file_order_repository_tests.rs"]
mod tests;

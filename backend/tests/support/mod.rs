//! Shared fixtures for integration suites.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use hot_coffee::domain::ports::{
    InventoryLedger, InventoryLedgerError, MenuCatalogue, MenuCatalogueError,
};
use hot_coffee::domain::{InventoryItem, MenuItem, OrderService};
use hot_coffee::outbound::persistence::JsonFileOrderRepository;
use mockable::Clock;
use tempfile::TempDir;

/// Clock frozen at a known instant.
pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn opening_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 7, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// A temporary data directory and a service persisting into it.
pub struct StoreFixture {
    pub dir: TempDir,
    pub service: OrderService<JsonFileOrderRepository>,
}

pub fn store_fixture() -> StoreFixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = JsonFileOrderRepository::open(dir.path()).expect("repository opens");
    let service = OrderService::new(Arc::new(repo), Arc::new(FrozenClock(opening_time())));
    StoreFixture { dir, service }
}

/// In-memory stock ledger for exercising deductions.
#[derive(Default)]
pub struct Stockroom {
    items: Mutex<Vec<InventoryItem>>,
}

impl Stockroom {
    pub fn with(items: Vec<InventoryItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    pub fn on_hand(&self, ingredient_id: &str) -> Option<i64> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|item| item.ingredient_id == ingredient_id)
            .map(|item| item.quantity)
    }
}

#[async_trait]
impl InventoryLedger for Stockroom {
    async fn deduct(&self, ingredient_id: &str, amount: i64) -> Result<(), InventoryLedgerError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let item = items
            .iter_mut()
            .find(|item| item.ingredient_id == ingredient_id)
            .ok_or_else(|| InventoryLedgerError::unknown_ingredient(ingredient_id))?;
        if item.quantity < amount {
            return Err(InventoryLedgerError::insufficient_stock(
                ingredient_id,
                amount,
                item.quantity,
            ));
        }
        item.quantity -= amount;
        Ok(())
    }
}

/// Menu holding a fixed set of products.
pub struct FixedMenu(pub Vec<MenuItem>);

#[async_trait]
impl MenuCatalogue for FixedMenu {
    async fn find_product(&self, product_id: &str) -> Result<MenuItem, MenuCatalogueError> {
        self.0
            .iter()
            .find(|item| item.product_id == product_id)
            .cloned()
            .ok_or_else(|| MenuCatalogueError::unknown_product(product_id))
    }
}

//! Order lifecycle service.
//!
//! Implements the [`OrderCommand`] and [`OrderQuery`] driving ports on top of
//! an [`OrderRepository`]. This is the only place that knows order rules:
//! identifier and timestamp assignment, line validation, and the single
//! `open -> closed` transition.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    InventoryLedger, InventoryLedgerError, MenuCatalogue, MenuCatalogueError,
    NoOpInventoryLedger, OrderCommand, OrderQuery, OrderRepository, OrderRepositoryError,
    UncheckedMenuCatalogue,
};
use crate::domain::{
    Error, MenuItem, Order, OrderChange, OrderDraft, OrderId, OrderValidationError,
};

/// Order service implementing the order driving ports.
#[derive(Clone)]
pub struct OrderService<R> {
    repo: Arc<R>,
    menu: Arc<dyn MenuCatalogue>,
    inventory: Arc<dyn InventoryLedger>,
    clock: Arc<dyn Clock>,
}

impl<R> OrderService<R> {
    /// Create a service over `repo`.
    ///
    /// Menu and inventory checks start out wired to [`UncheckedMenuCatalogue`]
    /// and [`NoOpInventoryLedger`]; use [`Self::with_menu`] and
    /// [`Self::with_inventory`] to plug in real collaborators.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            menu: Arc::new(UncheckedMenuCatalogue),
            inventory: Arc::new(NoOpInventoryLedger),
            clock,
        }
    }

    /// Replace the menu catalogue consulted during creation.
    #[must_use]
    pub fn with_menu(mut self, menu: Arc<dyn MenuCatalogue>) -> Self {
        self.menu = menu;
        self
    }

    /// Replace the inventory ledger charged during creation.
    #[must_use]
    pub fn with_inventory(mut self, inventory: Arc<dyn InventoryLedger>) -> Self {
        self.inventory = inventory;
        self
    }
}

fn map_validation_error(err: OrderValidationError) -> Error {
    let details = match &err {
        OrderValidationError::EmptyOrder => json!({
            "field": "items",
            "code": "empty_order",
        }),
        OrderValidationError::MissingProduct { index } => json!({
            "field": "items",
            "index": index,
            "code": "missing_product",
        }),
        OrderValidationError::InvalidQuantity { index, quantity } => json!({
            "field": "items",
            "index": index,
            "quantity": quantity,
            "code": "invalid_quantity",
        }),
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

fn map_repository_error(operation: &'static str, err: OrderRepositoryError) -> Error {
    if matches!(
        err,
        OrderRepositoryError::NotFound { .. } | OrderRepositoryError::AlreadyClosed { .. }
    ) {
        debug!(operation, error = %err, "order change rejected");
    } else {
        error!(operation, error = %err, "order store operation failed");
    }

    match err {
        OrderRepositoryError::NotFound { id } => {
            Error::not_found("order not found").with_details(json!({
                "id": id,
                "code": "order_not_found",
            }))
        }
        OrderRepositoryError::AlreadyClosed { id } => {
            Error::invalid_request("order already closed").with_details(json!({
                "id": id,
                "code": "already_closed",
            }))
        }
        OrderRepositoryError::DuplicateId { id } => {
            Error::internal(format!("order id {id} is already in use")).with_details(json!({
                "id": id,
                "code": "duplicate_id",
            }))
        }
        OrderRepositoryError::Io { message } => {
            Error::internal(format!("order store unavailable: {message}"))
                .with_details(json!({ "code": "store_io" }))
        }
        OrderRepositoryError::Corrupt { message } => {
            Error::internal(format!("order store is corrupt: {message}"))
                .with_details(json!({ "code": "store_corrupt" }))
        }
    }
}

fn map_menu_error(index: usize, err: MenuCatalogueError) -> Error {
    match err {
        MenuCatalogueError::UnknownProduct { product_id } => {
            Error::invalid_request("unknown product").with_details(json!({
                "field": "items",
                "index": index,
                "productId": product_id,
                "code": "unknown_product",
            }))
        }
        MenuCatalogueError::Unavailable { message } => {
            error!(error = %message, "menu catalogue unavailable");
            Error::internal(format!("menu catalogue unavailable: {message}"))
        }
    }
}

fn map_inventory_error(err: InventoryLedgerError) -> Error {
    match err {
        InventoryLedgerError::InsufficientStock {
            ingredient_id,
            requested,
            available,
        } => Error::invalid_request("insufficient stock").with_details(json!({
            "ingredientId": ingredient_id,
            "requested": requested,
            "available": available,
            "code": "insufficient_stock",
        })),
        other => {
            error!(error = %other, "inventory deduction failed");
            Error::internal(format!("inventory ledger error: {other}"))
        }
    }
}

impl<R> OrderService<R>
where
    R: OrderRepository,
{
    /// Resolve every line to its menu product, in line order.
    async fn resolve_products(&self, draft: &OrderDraft) -> Result<Vec<MenuItem>, Error> {
        let mut products = Vec::with_capacity(draft.items.len());
        for (index, item) in draft.items.iter().enumerate() {
            let product = self
                .menu
                .find_product(&item.product_id)
                .await
                .map_err(|err| map_menu_error(index, err))?;
            products.push(product);
        }
        Ok(products)
    }

    async fn deduct_stock(&self, draft: &OrderDraft, products: &[MenuItem]) -> Result<(), Error> {
        for (item, product) in draft.items.iter().zip(products) {
            for ingredient in &product.ingredients {
                let amount = ingredient.quantity.checked_mul(item.quantity).ok_or_else(|| {
                    Error::invalid_request("invalid quantity").with_details(json!({
                        "field": "items",
                        "productId": item.product_id,
                        "code": "invalid_quantity",
                    }))
                })?;
                self.inventory
                    .deduct(&ingredient.ingredient_id, amount)
                    .await
                    .map_err(map_inventory_error)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R> OrderCommand for OrderService<R>
where
    R: OrderRepository,
{
    async fn create_order(&self, draft: OrderDraft) -> Result<Order, Error> {
        draft.validate().map_err(map_validation_error)?;
        let products = self.resolve_products(&draft).await?;
        self.deduct_stock(&draft, &products).await?;

        let order = Order::open(OrderId::random(), draft, self.clock.utc());
        self.repo
            .create(&order)
            .await
            .map_err(|err| map_repository_error("create", err))?;

        info!(order_id = %order.id, items = order.items.len(), "order created");
        Ok(order)
    }

    async fn update_order(&self, id: &OrderId, changes: OrderDraft) -> Result<Order, Error> {
        let updated = self
            .repo
            .modify(id, OrderChange::Revise(changes))
            .await
            .map_err(|err| map_repository_error("update", err))?;

        info!(order_id = %id, "order updated");
        Ok(updated)
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), Error> {
        self.repo
            .delete(id)
            .await
            .map_err(|err| map_repository_error("delete", err))?;

        info!(order_id = %id, "order deleted");
        Ok(())
    }

    async fn close_order(&self, id: &OrderId) -> Result<Order, Error> {
        let order = self
            .repo
            .modify(id, OrderChange::Close)
            .await
            .map_err(|err| map_repository_error("close", err))?;

        info!(order_id = %id, "order closed");
        Ok(order)
    }
}

#[async_trait]
impl<R> OrderQuery for OrderService<R>
where
    R: OrderRepository,
{
    async fn list_orders(&self) -> Result<Vec<Order>, Error> {
        self.repo
            .list()
            .await
            .map_err(|err| map_repository_error("list", err))
    }

    async fn fetch_order(&self, id: &OrderId) -> Result<Order, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error("fetch", err))
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;

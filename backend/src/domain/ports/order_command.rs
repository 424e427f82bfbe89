//! Driving port for order mutations.
//!
//! Inbound adapters call this port; they never reach the repository directly.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, Order, OrderDraft, OrderId};

/// Use-cases that change orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Validate a draft and store it as a new open order.
    async fn create_order(&self, draft: OrderDraft) -> Result<Order, Error>;

    /// Replace the client-editable fields of an existing order.
    async fn update_order(&self, id: &OrderId, changes: OrderDraft) -> Result<Order, Error>;

    /// Remove an order.
    async fn delete_order(&self, id: &OrderId) -> Result<(), Error>;

    /// Close an open order and return it.
    async fn close_order(&self, id: &OrderId) -> Result<Order, Error>;
}

/// Command port that accepts creations without storing them and knows no
/// existing orders.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderCommand;

#[async_trait]
impl OrderCommand for FixtureOrderCommand {
    async fn create_order(&self, draft: OrderDraft) -> Result<Order, Error> {
        Ok(Order::open(OrderId::random(), draft, Utc::now()))
    }

    async fn update_order(&self, id: &OrderId, _changes: OrderDraft) -> Result<Order, Error> {
        Err(Error::not_found(format!("order {id} not found")))
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), Error> {
        Err(Error::not_found(format!("order {id} not found")))
    }

    async fn close_order(&self, id: &OrderId) -> Result<Order, Error> {
        Err(Error::not_found(format!("order {id} not found")))
    }
}

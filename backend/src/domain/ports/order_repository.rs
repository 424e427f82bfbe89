//! Driven port for order persistence.
//!
//! The repository stores whatever orders it is handed; business rules live in
//! [`crate::domain::OrderService`]. Implementations must make each call atomic
//! with respect to every other call on the same instance.

use async_trait::async_trait;

use crate::domain::{Order, OrderChange, OrderId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// No stored order has the requested id.
        NotFound { id: String } => "order {id} not found",
        /// Closing was requested for an order that is already closed.
        AlreadyClosed { id: String } => "order {id} is already closed",
        /// An order with the same id is already stored.
        DuplicateId { id: String } => "order {id} already exists",
        /// The backing store could not be opened, read, or written.
        Io { message: String } => "order store i/o failed: {message}",
        /// The backing store holds content that cannot be decoded.
        Corrupt { message: String } => "order store is corrupt: {message}",
    }
}

/// Port for durable storage of the full order set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Append a new order.
    ///
    /// Fails with [`OrderRepositoryError::DuplicateId`] when the id is taken.
    async fn create(&self, order: &Order) -> Result<(), OrderRepositoryError>;

    /// Every stored order in storage order. An empty or missing store yields
    /// an empty list.
    async fn list(&self) -> Result<Vec<Order>, OrderRepositoryError>;

    /// The first order whose id matches.
    async fn find_by_id(&self, id: &OrderId) -> Result<Order, OrderRepositoryError>;

    /// Replace the stored order with the same id, keeping its position.
    async fn update(&self, order: &Order) -> Result<(), OrderRepositoryError>;

    /// Apply `change` to the stored order and return the changed order.
    ///
    /// Reading, changing, and writing happen in one atomic cycle, so a
    /// concurrent call can never act on a stale copy. Closing a closed order
    /// fails with [`OrderRepositoryError::AlreadyClosed`] and writes nothing.
    async fn modify(
        &self,
        id: &OrderId,
        change: OrderChange,
    ) -> Result<Order, OrderRepositoryError>;

    /// Remove the order with the given id.
    async fn delete(&self, id: &OrderId) -> Result<(), OrderRepositoryError>;
}

/// Repository that stores nothing.
///
/// Writes succeed and are discarded; lookups report not found. Useful where
/// persistence is irrelevant to the behaviour under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderRepository;

#[async_trait]
impl OrderRepository for FixtureOrderRepository {
    async fn create(&self, _order: &Order) -> Result<(), OrderRepositoryError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Order, OrderRepositoryError> {
        Err(OrderRepositoryError::not_found(id.as_str()))
    }

    async fn update(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        Err(OrderRepositoryError::not_found(order.id.as_str()))
    }

    async fn modify(
        &self,
        id: &OrderId,
        _change: OrderChange,
    ) -> Result<Order, OrderRepositoryError> {
        Err(OrderRepositoryError::not_found(id.as_str()))
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderRepositoryError> {
        Err(OrderRepositoryError::not_found(id.as_str()))
    }
}

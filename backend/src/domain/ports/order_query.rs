//! Driving port for reading orders.

use async_trait::async_trait;

use crate::domain::{Error, Order, OrderId};

/// Read-only order use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Every stored order in storage order.
    async fn list_orders(&self) -> Result<Vec<Order>, Error>;

    /// A single order by id.
    async fn fetch_order(&self, id: &OrderId) -> Result<Order, Error>;
}

/// Query port over an empty order set.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderQuery;

#[async_trait]
impl OrderQuery for FixtureOrderQuery {
    async fn list_orders(&self) -> Result<Vec<Order>, Error> {
        Ok(Vec::new())
    }

    async fn fetch_order(&self, id: &OrderId) -> Result<Order, Error> {
        Err(Error::not_found(format!("order {id} not found")))
    }
}

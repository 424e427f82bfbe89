//! Shared state handed to HTTP handlers.
//!
//! Handlers only see the driving ports, so they can be exercised with
//! fixtures or mocks and no filesystem.

use std::sync::Arc;

use crate::domain::ports::{FixtureOrderCommand, FixtureOrderQuery, OrderCommand, OrderQuery};

/// Port bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Order mutations.
    pub orders: Arc<dyn OrderCommand>,
    /// Order reads.
    pub orders_query: Arc<dyn OrderQuery>,
}

impl HttpState {
    /// Bundle the order ports.
    pub fn new(orders: Arc<dyn OrderCommand>, orders_query: Arc<dyn OrderQuery>) -> Self {
        Self {
            orders,
            orders_query,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureOrderCommand), Arc::new(FixtureOrderQuery))
    }
}

//! Domain ports.
//!
//! Driving ports (`OrderCommand`, `OrderQuery`) are what inbound adapters call.
//! Driven ports (`OrderRepository`, `MenuCatalogue`, `InventoryLedger`) are
//! what the domain needs from the outside world. Each port ships a fixture or
//! no-op implementation, and `mockall` mocks under `cfg(test)`.

mod inventory_ledger;
mod macros;
mod menu_catalogue;
mod order_command;
mod order_query;
mod order_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use inventory_ledger::MockInventoryLedger;
pub use inventory_ledger::{InventoryLedger, InventoryLedgerError, NoOpInventoryLedger};
#[cfg(test)]
pub use menu_catalogue::MockMenuCatalogue;
pub use menu_catalogue::{MenuCatalogue, MenuCatalogueError, UncheckedMenuCatalogue};
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::{FixtureOrderCommand, OrderCommand};
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::{FixtureOrderQuery, OrderQuery};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{FixtureOrderRepository, OrderRepository, OrderRepositoryError};

//! Persistence adapters.

mod json_file_order_repository;

pub use json_file_order_repository::{JsonFileOrderRepository, ORDERS_FILE};

//! Domain layer: order entities, lifecycle rules, and ports.
//!
//! Nothing here depends on HTTP or the filesystem. Inbound adapters talk to
//! the driving ports in [`ports`]; outbound adapters implement the driven
//! ones.

pub mod error;
mod inventory;
mod menu;
mod order;
mod order_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::inventory::InventoryItem;
pub use self::menu::{MenuIngredient, MenuItem};
pub use self::order::{
    AlreadyClosed, CreatedAt, Order, OrderChange, OrderDraft, OrderId, OrderItem, OrderStatus,
    OrderValidationError,
};
pub use self::order_service::OrderService;
pub use self::trace_id::TraceId;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

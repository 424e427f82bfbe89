//! Order aggregate and its lifecycle rules.
//!
//! Serialisation uses the persisted field names (`product_id`, `created_at`)
//! so the same representation is written to disk and returned to clients.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an identifier received from a caller or read from storage.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh UUID v4 identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Creation timestamp exactly as stored.
///
/// New orders get an RFC 3339 rendering of the creation instant. Text read
/// back from storage is kept verbatim, so rewriting the order set never
/// changes an existing record's timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatedAt(String);

impl CreatedAt {
    /// Borrow the stored text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the stored text, if it is valid RFC 3339.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.0).ok()
    }
}

impl From<DateTime<Utc>> for CreatedAt {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<CreatedAt> for String {
    fn from(value: CreatedAt) -> Self {
        value.0
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order lifecycle state. `Open` may move to `Closed` once; `Closed` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepting changes.
    #[default]
    Open,
    /// Settled.
    Closed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Closed => "closed",
        })
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Menu product reference.
    pub product_id: String,
    /// Units ordered; must be positive.
    pub quantity: i64,
}

impl OrderItem {
    /// Convenience constructor.
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Client-editable portion of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Free-form customer reference, stored as given.
    pub customer_name: Option<String>,
    /// Lines in submission order.
    pub items: Vec<OrderItem>,
}

/// Reasons a draft cannot become an order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    /// The draft has no lines.
    #[error("empty order")]
    EmptyOrder,
    /// A line has an empty product id.
    #[error("missing product")]
    MissingProduct {
        /// Position of the offending line.
        index: usize,
    },
    /// A line has a zero or negative quantity.
    #[error("invalid quantity")]
    InvalidQuantity {
        /// Position of the offending line.
        index: usize,
        /// Rejected quantity.
        quantity: i64,
    },
}

impl OrderDraft {
    /// Check the rules every new order must satisfy.
    ///
    /// Lines are checked in order and the first failure wins. Within a line
    /// the quantity is checked before the product id.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.items.is_empty() {
            return Err(OrderValidationError::EmptyOrder);
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(OrderValidationError::InvalidQuantity {
                    index,
                    quantity: item.quantity,
                });
            }
            if item.product_id.is_empty() {
                return Err(OrderValidationError::MissingProduct { index });
            }
        }
        Ok(())
    }
}

/// Raised when closing an order that is already closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order {id} is already closed")]
pub struct AlreadyClosed {
    /// The order that was already closed.
    pub id: OrderId,
}

/// Change applied to one stored order in a single read-modify-write cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderChange {
    /// Replace the client-editable fields.
    Revise(OrderDraft),
    /// Move the order to `closed`.
    Close,
}

/// A persisted customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Server-assigned identifier.
    pub id: OrderId,
    /// Customer reference passed through from the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Lines in submission order.
    pub items: Vec<OrderItem>,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Creation time as RFC 3339 text.
    pub created_at: CreatedAt,
}

impl Order {
    /// Open a new order from a draft.
    #[must_use]
    pub fn open(id: OrderId, draft: OrderDraft, created_at: DateTime<Utc>) -> Self {
        let OrderDraft {
            customer_name,
            items,
        } = draft;
        Self {
            id,
            customer_name,
            items,
            status: OrderStatus::Open,
            created_at: CreatedAt::from(created_at),
        }
    }

    /// Whether the order has reached its terminal state.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == OrderStatus::Closed
    }

    /// Move the order from `open` to `closed`.
    pub fn close(&mut self) -> Result<(), AlreadyClosed> {
        if self.is_closed() {
            return Err(AlreadyClosed {
                id: self.id.clone(),
            });
        }
        self.status = OrderStatus::Closed;
        Ok(())
    }

    /// Apply `change` in place. Only closing can fail.
    pub fn apply(&mut self, change: OrderChange) -> Result<(), AlreadyClosed> {
        match change {
            OrderChange::Revise(draft) => {
                self.customer_name = draft.customer_name;
                self.items = draft.items;
                Ok(())
            }
            OrderChange::Close => self.close(),
        }
    }
}

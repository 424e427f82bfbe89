//! Stock records owned by the inventory collaborator.

use serde::{Deserialize, Serialize};

/// One ingredient on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Stable ingredient reference.
    pub ingredient_id: String,
    /// Display name.
    pub name: String,
    /// Units on hand; reduced by deductions.
    pub quantity: i64,
    /// Unit of measure, e.g. `ml` or `g`.
    pub unit: String,
}

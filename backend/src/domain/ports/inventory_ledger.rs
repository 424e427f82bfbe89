//! Driven port for stock deductions triggered by new orders.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by inventory adapters.
    pub enum InventoryLedgerError {
        /// Not enough stock remains for the deduction.
        InsufficientStock { ingredient_id: String, requested: i64, available: i64 } =>
            "insufficient stock for {ingredient_id}: requested {requested}, available {available}",
        /// The ingredient is not tracked.
        UnknownIngredient { ingredient_id: String } =>
            "ingredient {ingredient_id} is not tracked",
        /// The ledger could not be reached.
        Unavailable { message: String } => "inventory ledger unavailable: {message}",
    }
}

/// Port adjusting ingredient stock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    /// Reduce the stock of `ingredient_id` by `amount`.
    async fn deduct(&self, ingredient_id: &str, amount: i64) -> Result<(), InventoryLedgerError>;
}

/// Ledger used while no inventory store is wired in; every deduction succeeds
/// and nothing is recorded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpInventoryLedger;

#[async_trait]
impl InventoryLedger for NoOpInventoryLedger {
    async fn deduct(&self, _ingredient_id: &str, _amount: i64) -> Result<(), InventoryLedgerError> {
        Ok(())
    }
}

//! Menu entries as seen by order validation.

use serde::{Deserialize, Serialize};

/// Ingredient consumed by one unit of a menu product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuIngredient {
    /// Inventory reference.
    pub ingredient_id: String,
    /// Amount consumed per unit ordered.
    pub quantity: i64,
}

/// A product a customer may order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Product reference used by order lines.
    pub product_id: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Recipe used for stock deduction.
    #[serde(default)]
    pub ingredients: Vec<MenuIngredient>,
}

impl MenuItem {
    /// A product with no recipe; ordering it consumes no stock.
    pub fn without_recipe(product_id: impl Into<String>) -> Self {
        let product_id = product_id.into();
        Self {
            name: product_id.clone(),
            product_id,
            price: 0.0,
            ingredients: Vec::new(),
        }
    }
}

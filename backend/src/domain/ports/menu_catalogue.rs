//! Driven port for menu lookups made while validating new orders.

use async_trait::async_trait;

use crate::domain::MenuItem;

use super::define_port_error;

define_port_error! {
    /// Errors raised by menu catalogue adapters.
    pub enum MenuCatalogueError {
        /// The product is not on the menu.
        UnknownProduct { product_id: String } => "product {product_id} is not on the menu",
        /// The catalogue could not be consulted.
        Unavailable { message: String } => "menu catalogue unavailable: {message}",
    }
}

/// Port resolving order lines to menu products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCatalogue: Send + Sync {
    /// Look up a product by id.
    async fn find_product(&self, product_id: &str) -> Result<MenuItem, MenuCatalogueError>;
}

/// Catalogue used while no menu store is wired in: every product exists and
/// has an empty recipe.
#[derive(Debug, Default, Clone, Copy)]
pub struct UncheckedMenuCatalogue;

#[async_trait]
impl MenuCatalogue for UncheckedMenuCatalogue {
    async fn find_product(&self, product_id: &str) -> Result<MenuItem, MenuCatalogueError> {
        Ok(MenuItem::without_recipe(product_id))
    }
}

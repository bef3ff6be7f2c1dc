use thiserror::Error;

use crate::cart::CartError;
use crate::inventory::InventoryError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

use thiserror::Error;

use crate::identity::AuthError;
use crate::inventory::InventoryError;
use crate::store::StoreError;

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Authentication required: {0}")]
    AuthenticationRequired(#[from] AuthError),
    #[error("Order not formed: {0}")]
    NotFormed(#[from] InventoryError),
    #[error("Order persistence failure: {0}")]
    PersistenceFailure(String),
}

impl From<StoreError> for OrderError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Inventory(e) => OrderError::NotFormed(e),
            StoreError::Unavailable(msg) => OrderError::PersistenceFailure(msg),
            StoreError::Cart(e) => OrderError::PersistenceFailure(e.to_string()),
        }
    }
}

use thiserror::Error;

use crate::domain::ProductId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),
}

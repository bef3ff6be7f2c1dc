use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog item. Category and shop are referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub shop: String,
}

#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub shop: String,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, category: impl Into<String>, shop: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            shop: shop.into(),
        }
    }
}

use serde::{Deserialize, Serialize};

use super::{ProductId, UserId};

/// A pending request for `quantity` units of a product. `quantity` is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

use serde::{Deserialize, Serialize};

use super::{ProductId, StockId};

/// One stock listing for a product. A product may have several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: StockId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
}

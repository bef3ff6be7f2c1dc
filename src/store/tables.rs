use tracing::debug;

use crate::cart::CartBook;
use crate::domain::{Order, OrderId, OrderItem, OrderItemId, OrderReceipt};
use crate::inventory::InventoryLedger;

/// Every row the order transaction may touch.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub ledger: InventoryLedger,
    pub carts: CartBook,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    order_seq: u64,
    item_seq: u64,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `work` against a staged copy of the tables.
    ///
    /// The copy replaces the live tables only when `work` returns `Ok`; on
    /// `Err` (or a panic) the live tables are exactly as they were.
    pub fn transaction<T, E>(&mut self, work: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E> {
        let mut staged = self.clone();
        let out = work(&mut staged)?;
        *self = staged;
        debug!("Transaction committed");
        Ok(out)
    }

    pub fn next_order_id(&mut self) -> OrderId {
        self.order_seq += 1;
        format!("order_{}", self.order_seq)
    }

    pub fn next_item_id(&mut self) -> OrderItemId {
        self.item_seq += 1;
        format!("item_{}", self.item_seq)
    }

    pub fn receipt(&self, order_id: &str) -> Option<OrderReceipt> {
        self.orders
            .iter()
            .find(|order| order.id == order_id)
            .map(|order| self.receipt_for(order))
    }

    pub fn receipts_for_user(&self, user_id: &str) -> Vec<OrderReceipt> {
        self.orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .map(|order| self.receipt_for(order))
            .collect()
    }

    fn receipt_for(&self, order: &Order) -> OrderReceipt {
        OrderReceipt {
            order: order.clone(),
            items: self
                .order_items
                .iter()
                .filter(|item| item.order_id == order.id)
                .cloned()
                .collect(),
        }
    }
}

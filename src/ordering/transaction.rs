use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Order, OrderItem, OrderReceipt, OrderStatus};
use crate::inventory::InventoryError;
use crate::store::Tables;

/// Converts the user's cart into an order.
///
/// Must run inside [`Tables::transaction`]: on the first line that cannot be
/// covered this returns early with the order row, earlier decrements and
/// earlier items already written to `tx`, and only the rollback discards them.
/// An empty cart yields an order without items.
pub fn place_order(tx: &mut Tables, user_id: &str, now: DateTime<Utc>) -> Result<OrderReceipt, InventoryError> {
    let lines = tx.carts.lines_for(user_id);
    if lines.is_empty() {
        debug!(user_id, "Cart is empty, order will carry no items");
    }

    let order = Order {
        id: tx.next_order_id(),
        user_id: user_id.to_string(),
        status: OrderStatus::Processing,
        created_at: now,
    };
    tx.orders.push(order.clone());

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        tx.ledger.check_and_decrement(&line.product_id, line.quantity)?;

        let item = OrderItem {
            id: tx.next_item_id(),
            order_id: order.id.clone(),
            product_id: line.product_id,
            quantity: line.quantity,
        };
        tx.order_items.push(item.clone());
        items.push(item);
    }

    tx.carts.clear(user_id);
    Ok(OrderReceipt { order, items })
}

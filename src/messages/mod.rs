use tokio::sync::oneshot;

use crate::domain::{CartLine, OrderId, OrderReceipt, ProductId, StockId, StockRecord, UserId};
use crate::store::StoreError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the store actor. Each is executed to completion
/// before the next one is taken from the mailbox.
#[derive(Debug)]
pub enum StoreRequest {
    AddStock {
        product_id: ProductId,
        quantity: u32,
        price: u64,
        respond_to: ServiceResponse<StockId, StoreError>,
    },
    StockFor {
        product_id: ProductId,
        respond_to: ServiceResponse<Vec<StockRecord>, StoreError>,
    },
    AddCartLine {
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        respond_to: ServiceResponse<(), StoreError>,
    },
    RemoveCartProduct {
        user_id: UserId,
        product_id: ProductId,
        respond_to: ServiceResponse<usize, StoreError>,
    },
    CartLines {
        user_id: UserId,
        respond_to: ServiceResponse<Vec<CartLine>, StoreError>,
    },
    PlaceOrder {
        user_id: UserId,
        respond_to: ServiceResponse<OrderReceipt, StoreError>,
    },
    GetOrder {
        order_id: OrderId,
        respond_to: ServiceResponse<Option<OrderReceipt>, StoreError>,
    },
    OrdersFor {
        user_id: UserId,
        respond_to: ServiceResponse<Vec<OrderReceipt>, StoreError>,
    },
    Shutdown,
}

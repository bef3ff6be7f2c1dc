use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{CartLine, OrderId, OrderReceipt, ProductId, StockId, StockRecord, UserId};
use crate::messages::StoreRequest;
use crate::store::StoreError;

/// Client for the store actor.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

client_method!(StoreClient => fn add_stock(product_id: ProductId, quantity: u32, price: u64) -> StockId as StoreRequest::AddStock, Error = StoreError);
client_method!(StoreClient => fn stock_for(product_id: ProductId) -> Vec<StockRecord> as StoreRequest::StockFor, Error = StoreError);
client_method!(StoreClient => fn add_cart_line(user_id: UserId, product_id: ProductId, quantity: u32) -> () as StoreRequest::AddCartLine, Error = StoreError);
client_method!(StoreClient => fn remove_cart_product(user_id: UserId, product_id: ProductId) -> usize as StoreRequest::RemoveCartProduct, Error = StoreError);
client_method!(StoreClient => fn cart_lines(user_id: UserId) -> Vec<CartLine> as StoreRequest::CartLines, Error = StoreError);
client_method!(StoreClient => fn place_order(user_id: UserId) -> OrderReceipt as StoreRequest::PlaceOrder, Error = StoreError);
client_method!(StoreClient => fn get_order(order_id: OrderId) -> Option<OrderReceipt> as StoreRequest::GetOrder, Error = StoreError);
client_method!(StoreClient => fn orders_for(user_id: UserId) -> Vec<OrderReceipt> as StoreRequest::OrdersFor, Error = StoreError);

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{StoreError, Tables};
use crate::clients::StoreClient;
use crate::domain::{OrderReceipt, UserId};
use crate::messages::{ServiceResponse, StoreRequest};
use crate::ordering::place_order;

/// Owns the transactional tables. One message at a time, so a transaction
/// never interleaves with another reader or writer.
pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    tables: Tables,
}

impl StoreService {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            tables: Tables::new(),
        };
        (service, StoreClient::new(sender))
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::AddStock { product_id, quantity, price, respond_to } => {
                    let id = self.tables.ledger.add_record(product_id.clone(), quantity, price);
                    let total = self.tables.ledger.available(&product_id);
                    debug!(stock_id = %id, quantity, total, "Stock record added");
                    let _ = respond_to.send(Ok(id));
                }
                StoreRequest::StockFor { product_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.tables.ledger.records_for(&product_id)));
                }
                StoreRequest::AddCartLine { user_id, product_id, quantity, respond_to } => {
                    let result = self.tables.carts.add_line(&user_id, &product_id, quantity);
                    let _ = respond_to.send(result.map_err(StoreError::from));
                }
                StoreRequest::RemoveCartProduct { user_id, product_id, respond_to } => {
                    let result = self.tables.carts.remove_product(&user_id, &product_id);
                    let _ = respond_to.send(result.map_err(StoreError::from));
                }
                StoreRequest::CartLines { user_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.tables.carts.lines_for(&user_id)));
                }
                StoreRequest::PlaceOrder { user_id, respond_to } => {
                    self.handle_place_order(user_id, respond_to);
                }
                StoreRequest::GetOrder { order_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.tables.receipt(&order_id)));
                }
                StoreRequest::OrdersFor { user_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.tables.receipts_for_user(&user_id)));
                }
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
            }
        }

        info!("StoreService stopped");
    }

    #[instrument(fields(user_id = %user_id), skip(self, respond_to))]
    fn handle_place_order(&mut self, user_id: UserId, respond_to: ServiceResponse<OrderReceipt, StoreError>) {
        debug!("Processing place_order request");

        let now = Utc::now();
        let result = self.tables.transaction(|tx| place_order(tx, &user_id, now));

        match &result {
            Ok(receipt) => info!(order_id = %receipt.order.id, items = receipt.items.len(), "Order committed"),
            Err(e) => warn!(error = %e, "Order rolled back"),
        }

        let _ = respond_to.send(result.map_err(StoreError::from));
    }
}

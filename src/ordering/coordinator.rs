use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::OrderError;
use crate::clients::StoreClient;
use crate::domain::OrderReceipt;
use crate::identity::IdentityProvider;
use crate::notify::Notifier;

/// Client-side orchestration of order placement.
///
/// Rejects unauthenticated and inactive callers before anything reaches the
/// store, has the store run the whole transaction, then notifies. Nothing is
/// retried: each successful call creates a new order.
#[derive(Clone)]
pub struct OrderCoordinator {
    identity: Arc<dyn IdentityProvider>,
    store: StoreClient,
    notifier: Arc<dyn Notifier>,
}

impl OrderCoordinator {
    pub fn new(identity: Arc<dyn IdentityProvider>, store: StoreClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            identity,
            store,
            notifier,
        }
    }

    #[instrument(skip_all)]
    pub async fn place_order(&self, authorization: Option<&str>) -> Result<OrderReceipt, OrderError> {
        info!("Processing place_order request");

        // Step 1: Resolve the acting user
        let identity = self.identity.resolve(authorization).await.and_then(|id| id.require_active());
        let identity = match identity {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Caller rejected");
                return Err(OrderError::AuthenticationRequired(e));
            }
        };

        // Step 2: Run the transaction in the store
        let receipt = match self.store.place_order(identity.user_id.clone()).await {
            Ok(receipt) => receipt,
            Err(e) => {
                let e = OrderError::from(e);
                match &e {
                    OrderError::PersistenceFailure(_) => error!(user_id = %identity.user_id, error = %e, "Store failure"),
                    _ => info!(user_id = %identity.user_id, error = %e, "Order not formed"),
                }
                return Err(e);
            }
        };

        info!(order_id = %receipt.order.id, items = receipt.items.len(), "Order placed");

        // Step 3: Tell the outside world
        if let Err(e) = self.notifier.order_placed(&receipt).await {
            warn!(order_id = %receipt.order.id, error = %e, "Order notification failed");
        }

        Ok(receipt)
    }
}

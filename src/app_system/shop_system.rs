use std::sync::Arc;

use tracing::{error, info};

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::api::Dispatcher;
use crate::clients::{ProductClient, StoreClient, UserClient};
use crate::config::ShopConfig;
use crate::domain::{Product, User};
use crate::identity::{AccountService, IdentityProvider, TokenIdentityProvider, TokenService};
use crate::notify::Notifier;
use crate::ordering::OrderCoordinator;
use crate::store::StoreService;

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct ShopSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub store_client: StoreClient,
    pub accounts: AccountService,
    pub orders: OrderCoordinator,
    pub identity: Arc<dyn IdentityProvider>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &ShopConfig, notifier: Arc<dyn Notifier>) -> Self {
        let capacity = config.mailbox_capacity;

        // 1. User directory
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(capacity, sequential_ids("user"));
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Product catalog
        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(capacity, sequential_ids("product"));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Transactional store (stock, carts, orders)
        let (store_service, store_client) = StoreService::new(capacity);
        let store_handle = tokio::spawn(store_service.run());

        // 4. Identity and the services built on it
        let tokens = Arc::new(TokenService::new(config.token_secret.clone(), config.token_ttl));
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(TokenIdentityProvider::new(tokens.clone(), user_client.clone()));
        let accounts = AccountService::new(user_client.clone(), tokens, notifier.clone());
        let orders = OrderCoordinator::new(identity.clone(), store_client.clone(), notifier);

        info!(mailbox_capacity = capacity, "Shop system started");

        Self {
            user_client,
            product_client,
            store_client,
            accounts,
            orders,
            identity,
            handles: vec![user_handle, product_handle, store_handle],
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            self.identity.clone(),
            self.accounts.clone(),
            self.orders.clone(),
            self.product_client.clone(),
            self.store_client.clone(),
        )
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // An actor that already stopped has nothing left to shut down.
        if let Err(e) = self.store_client.shutdown().await {
            info!(error = %e, "Store already stopped");
        }
        if let Err(e) = self.user_client.shutdown().await {
            info!(error = %e, "User actor already stopped");
        }
        if let Err(e) = self.product_client.shutdown().await {
            info!(error = %e, "Product actor already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

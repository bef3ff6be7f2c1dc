mod actor_framework;
mod api;
mod app_system;
mod cart;
mod clients;
mod config;
mod domain;
mod identity;
mod inventory;
mod messages;
mod notify;
mod ordering;
mod product_actor;
mod store;
mod user_actor;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use tracing::{error, info, Instrument};

use crate::api::{ApiRequest, Command};
use crate::app_system::{setup_tracing, ShopSystem};
use crate::config::ShopConfig;
use crate::domain::ProductCreate;
use crate::identity::Registration;
use crate::notify::TracingNotifier;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ShopConfig::from_env().map_err(|e| e.to_string())?;
    info!("Starting shop with order placement");

    let notifier = Arc::new(TracingNotifier::new(config.notify_from.clone()));
    let system = ShopSystem::new(&config, notifier);
    let dispatcher = system.dispatcher();

    // Register and log in a demo customer
    let span = tracing::info_span!("customer_setup");
    let header = async {
        info!("Registering demo customer");
        let registration = Registration {
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            password: "wonderland".to_string(),
        };
        system.accounts.register(registration).await.map_err(|e| e.to_string())?;
        let grant = system
            .accounts
            .login("alice@example.com", "wonderland")
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(format!("Token {}", grant.token))
    }
    .instrument(span)
    .await?;

    // Seed the catalog
    let product_id = system
        .product_client
        .create_product(ProductCreate::new("Smartphone", "Phones", "Main shop"))
        .await
        .map_err(|e| e.to_string())?;
    system
        .store_client
        .add_stock(product_id.clone(), 10, 49_900)
        .await
        .map_err(|e| e.to_string())?;
    info!(product_id = %product_id, "Product stocked");

    // Fill the cart and place the order through the command surface
    let span = tracing::info_span!("order_processing");
    async {
        for command in [
            Command::AddToCart {
                product_id: product_id.clone(),
                quantity: 3,
            },
            Command::ListCart,
            Command::PlaceOrder,
            // More than is left in stock, so this order is refused
            Command::AddToCart {
                product_id: product_id.clone(),
                quantity: 8,
            },
            Command::PlaceOrder,
            Command::ListOrders,
        ] {
            let reply = dispatcher.dispatch(ApiRequest::new(Some(header.clone()), command)).await;
            if reply.status {
                info!(message = %reply.message, "Command succeeded");
            } else {
                error!(message = %reply.message, "Command failed");
            }
        }
    }
    .instrument(span)
    .await;

    let remaining: u32 = system
        .store_client
        .stock_for(product_id)
        .await
        .map_err(|e| e.to_string())?
        .iter()
        .map(|record| record.quantity)
        .sum();
    info!(remaining, "Stock after orders");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

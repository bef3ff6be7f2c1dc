use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{info, instrument, warn};

use super::{ApiError, ApiRequest, ApiResponse, Command, ErrorClass};
use crate::cart::CartError;
use crate::clients::{ProductClient, StoreClient};
use crate::domain::{ProductId, UserId};
use crate::identity::{AccountService, IdentityProvider, Registration};
use crate::ordering::OrderCoordinator;

/// A handler's successful outcome before it is wrapped into an [`ApiResponse`].
struct Reply {
    message: String,
    data: Option<JsonValue>,
}

impl Reply {
    fn with_data<T: Serialize>(message: impl Into<String>, data: &T) -> Result<Self, ApiError> {
        let data = serde_json::to_value(data).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self {
            message: message.into(),
            data: Some(data),
        })
    }
}

/// Routes each [`Command`] to its handler.
#[derive(Clone)]
pub struct Dispatcher {
    identity: Arc<dyn IdentityProvider>,
    accounts: AccountService,
    orders: OrderCoordinator,
    products: ProductClient,
    store: StoreClient,
}

impl Dispatcher {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        accounts: AccountService,
        orders: OrderCoordinator,
        products: ProductClient,
        store: StoreClient,
    ) -> Self {
        Self {
            identity,
            accounts,
            orders,
            products,
            store,
        }
    }

    /// Never fails: errors come back as `status: false` replies.
    #[instrument(skip_all, fields(command = request.command.name()))]
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        let authorization = request.authorization.as_deref();

        let result = match request.command {
            Command::Register(registration) => self.register(registration).await,
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::AddToCart { product_id, quantity } => self.add_to_cart(authorization, product_id, quantity).await,
            Command::RemoveFromCart { product_id } => self.remove_from_cart(authorization, product_id).await,
            Command::ListCart => self.list_cart(authorization).await,
            Command::PlaceOrder => self.place_order(authorization).await,
            Command::ListOrders => self.list_orders(authorization).await,
        };

        match result {
            Ok(reply) => ApiResponse::success(reply.message, reply.data),
            Err(e) => {
                match e.class() {
                    ErrorClass::Server => warn!(error = %e, "Command failed"),
                    _ => info!(error = %e, "Command rejected"),
                }
                ApiResponse::failure(&e)
            }
        }
    }

    async fn acting_user(&self, authorization: Option<&str>) -> Result<UserId, ApiError> {
        let identity = self.identity.resolve(authorization).await?.require_active()?;
        Ok(identity.user_id)
    }

    async fn register(&self, registration: Registration) -> Result<Reply, ApiError> {
        let user = self.accounts.register(registration).await?;
        Reply::with_data("User registered", &user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Reply, ApiError> {
        let grant = self.accounts.login(email, password).await?;
        Reply::with_data("Logged in", &grant)
    }

    async fn add_to_cart(
        &self,
        authorization: Option<&str>,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Reply, ApiError> {
        let user_id = self.acting_user(authorization).await?;
        if self.products.get_product(product_id.clone()).await?.is_none() {
            return Err(CartError::UnknownProduct(product_id).into());
        }
        self.store.add_cart_line(user_id, product_id, quantity).await?;
        Ok(Reply {
            message: "Added to cart".to_string(),
            data: None,
        })
    }

    async fn remove_from_cart(&self, authorization: Option<&str>, product_id: ProductId) -> Result<Reply, ApiError> {
        let user_id = self.acting_user(authorization).await?;
        let removed = self.store.remove_cart_product(user_id, product_id).await?;
        Reply::with_data(format!("Removed {} cart line(s)", removed), &removed)
    }

    async fn list_cart(&self, authorization: Option<&str>) -> Result<Reply, ApiError> {
        let user_id = self.acting_user(authorization).await?;
        let lines = self.store.cart_lines(user_id).await?;
        Reply::with_data(format!("{} line(s) in cart", lines.len()), &lines)
    }

    /// Identity is resolved by the coordinator itself.
    async fn place_order(&self, authorization: Option<&str>) -> Result<Reply, ApiError> {
        let receipt = self.orders.place_order(authorization).await?;
        Reply::with_data(format!("Order {} has been placed", receipt.order.id), &receipt)
    }

    async fn list_orders(&self, authorization: Option<&str>) -> Result<Reply, ApiError> {
        let user_id = self.acting_user(authorization).await?;
        let receipts = self.store.orders_for(user_id).await?;
        Reply::with_data(format!("{} order(s)", receipts.len()), &receipts)
    }
}

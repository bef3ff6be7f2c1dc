use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::ApiError;
use crate::domain::ProductId;
use crate::identity::Registration;

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Register(Registration),
    Login { email: String, password: String },
    AddToCart { product_id: ProductId, quantity: u32 },
    RemoveFromCart { product_id: ProductId },
    ListCart,
    PlaceOrder,
    ListOrders,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register(_) => "register",
            Command::Login { .. } => "login",
            Command::AddToCart { .. } => "add_to_cart",
            Command::RemoveFromCart { .. } => "remove_from_cart",
            Command::ListCart => "list_cart",
            Command::PlaceOrder => "place_order",
            Command::ListOrders => "list_orders",
        }
    }

    /// Commands that act on behalf of a logged-in user.
    pub fn needs_identity(&self) -> bool {
        !matches!(self, Command::Register(_) | Command::Login { .. })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRequest {
    /// Raw authorization header value, e.g. `Token eyJ...`.
    #[serde(default)]
    pub authorization: Option<String>,
    pub command: Command,
}

impl ApiRequest {
    pub fn new(authorization: Option<String>, command: Command) -> Self {
        Self { authorization, command }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Coarse failure category a transport can map to its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    Client,
    Unauthorized,
    Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, data: Option<JsonValue>) -> Self {
        Self {
            status: true,
            message: message.into(),
            error: None,
            data,
        }
    }

    pub fn failure(error: &ApiError) -> Self {
        Self {
            status: false,
            message: error.to_string(),
            error: Some(error.class()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryError;
    use crate::ordering::OrderError;
    use serde_json::json;

    #[test]
    fn commands_parse_from_tagged_json() {
        let request: ApiRequest = serde_json::from_value(json!({
            "authorization": "Token abc",
            "command": { "command": "add_to_cart", "product_id": "product_1", "quantity": 2 }
        }))
        .unwrap();
        assert_eq!(request.authorization.as_deref(), Some("Token abc"));
        assert!(matches!(
            request.command,
            Command::AddToCart { ref product_id, quantity: 2 } if product_id == "product_1"
        ));

        let request: ApiRequest = serde_json::from_value(json!({ "command": { "command": "place_order" } })).unwrap();
        assert!(request.authorization.is_none());
        assert!(request.command.needs_identity());

        let register: Command = serde_json::from_value(json!({
            "command": "register", "email": "a@b.co", "username": "a", "password": "hunter22"
        }))
        .unwrap();
        assert_eq!(register.name(), "register");
        assert!(!register.needs_identity());
    }

    #[test]
    fn failure_reply_carries_message_and_class() {
        let error = ApiError::from(OrderError::NotFormed(InventoryError::InsufficientStock {
            product_id: "product_1".into(),
            requested: 5,
            available: 2,
        }));
        let reply = serde_json::to_value(ApiResponse::failure(&error)).unwrap();
        assert_eq!(
            reply,
            json!({
                "status": false,
                "message": "Order not formed: Insufficient stock for product product_1: requested 5, available 2",
                "error": "client"
            })
        );
    }

    #[test]
    fn success_reply_omits_empty_fields() {
        let reply = serde_json::to_value(ApiResponse::success("done", None)).unwrap();
        assert_eq!(reply, json!({ "status": true, "message": "done" }));
    }
}

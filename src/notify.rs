//! Outbound notifications, injected into the services that emit them.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::domain::{OrderReceipt, User};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Told about things that already happened. A failure here is reported but
/// never undoes the event itself.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn order_placed(&self, receipt: &OrderReceipt) -> Result<(), NotifyError>;
    async fn user_registered(&self, user: &User) -> Result<(), NotifyError>;
}

/// Writes each notification as a structured log event.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    from: String,
}

impl TracingNotifier {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn order_placed(&self, receipt: &OrderReceipt) -> Result<(), NotifyError> {
        info!(
            from = %self.from,
            user_id = %receipt.order.user_id,
            order_id = %receipt.order.id,
            items = receipt.items.len(),
            "Order confirmation sent"
        );
        Ok(())
    }

    async fn user_registered(&self, user: &User) -> Result<(), NotifyError> {
        info!(from = %self.from, to = %user.email, "Welcome message sent");
        Ok(())
    }
}

//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.
//! [`RecordingNotifier`] and [`FailingNotifier`] stand in for real notification delivery.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::domain::{OrderId, OrderReceipt, User, UserId};
use crate::notify::{Notifier, NotifyError};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends into a channel the test owns, so the test plays the actor:
/// it inspects each request and answers it (success, failure, or never).
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Remembers every notification it is given.
#[derive(Default)]
pub struct RecordingNotifier {
    orders: Mutex<Vec<OrderId>>,
    welcomed: Mutex<Vec<UserId>>,
}

impl RecordingNotifier {
    pub fn orders(&self) -> Vec<OrderId> {
        self.orders.lock().unwrap().clone()
    }

    pub fn welcomed(&self) -> Vec<UserId> {
        self.welcomed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn order_placed(&self, receipt: &OrderReceipt) -> Result<(), NotifyError> {
        self.orders.lock().unwrap().push(receipt.order.id.clone());
        Ok(())
    }

    async fn user_registered(&self, user: &User) -> Result<(), NotifyError> {
        self.welcomed.lock().unwrap().push(user.id.clone());
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn order_placed(&self, _receipt: &OrderReceipt) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("mail server unreachable".into()))
    }

    async fn user_registered(&self, _user: &User) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("mail server unreachable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::UserClient;
    use crate::domain::UserCreate;
    use crate::user_actor::{UserAction, UserError};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        // Test Create
        let create_client = client.clone();
        let create_task = tokio::spawn(async move {
            let user = UserCreate {
                email: "test@example.com".to_string(),
                username: "Test".to_string(),
                password_hash: "hash".to_string(),
            };
            create_client.create_user(user).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.username, "Test");
        responder.send(Ok("user_1".to_string())).unwrap();
        assert_eq!(create_task.await.unwrap(), Ok("user_1".to_string()));

        // Test Action, answered with a framework error
        let action_task = tokio::spawn(async move { client.set_active("user_1".to_string(), false).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "user_1");
        assert!(matches!(action, UserAction::Deactivate));
        responder.send(Err(FrameworkError::NotFound(id))).unwrap();
        assert_eq!(action_task.await.unwrap(), Err(UserError::NotFound("user_1".into())));
    }
}

use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{User, UserCreate, UserId};
use crate::user_actor::{UserAction, UserError};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(user).await.map_err(UserError::from)
    }

    /// Emails compare case-insensitively.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let wanted = email.to_lowercase();
        let mut found = self
            .inner
            .find(move |user: &User| user.email.to_lowercase() == wanted)
            .await
            .map_err(UserError::from)?;
        Ok(found.pop())
    }

    /// Returns whether the flag actually changed.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: UserId, active: bool) -> Result<bool, UserError> {
        debug!("Sending request");
        let action = if active { UserAction::Activate } else { UserAction::Deactivate };
        self.inner.perform_action(id, action).await.map_err(UserError::from)
    }

    pub async fn shutdown(&self) -> Result<(), UserError> {
        self.inner.shutdown().await.map_err(UserError::from)
    }
}

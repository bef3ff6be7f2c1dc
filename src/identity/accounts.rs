use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::password::{hash_password, verify_password};
use super::{AuthError, TokenService};
use crate::clients::UserClient;
use crate::domain::{User, UserCreate, UserId};
use crate::notify::Notifier;
use crate::user_actor::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MAX_PASSWORD_LENGTH: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// What a successful login hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginGrant {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub token: String,
}

/// Registration and login on top of the user directory.
#[derive(Clone)]
pub struct AccountService {
    users: UserClient,
    tokens: Arc<TokenService>,
    notifier: Arc<dyn Notifier>,
}

impl AccountService {
    pub fn new(users: UserClient, tokens: Arc<TokenService>, notifier: Arc<dyn Notifier>) -> Self {
        Self { users, tokens, notifier }
    }

    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<User, UserError> {
        let length = registration.password.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(UserError::ValidationError(format!(
                "password must be {}..={} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| UserError::PasswordHash(e.to_string()))?
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        let id = self
            .users
            .create_user(UserCreate {
                email: registration.email,
                username: registration.username,
                password_hash,
            })
            .await?;
        let user = self.users.get_user(id.clone()).await?.ok_or(UserError::NotFound(id))?;
        info!(user_id = %user.id, "User registered");

        if let Err(e) = self.notifier.user_registered(&user).await {
            warn!(error = %e, "Welcome notification failed");
        }
        Ok(user)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Lookup(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Lookup(e.to_string()))?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AuthError::Inactive);
        }

        let token = self.tokens.issue(&user.id)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginGrant {
            user_id: user.id,
            email: user.email,
            username: user.username,
            token,
        })
    }
}

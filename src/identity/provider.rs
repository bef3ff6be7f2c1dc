use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{token_from_header, AuthError, TokenService};
use crate::clients::UserClient;
use crate::domain::UserId;

/// The acting user, as resolved from request credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub is_active: bool,
}

impl Identity {
    pub fn require_active(self) -> Result<Self, AuthError> {
        if self.is_active {
            Ok(self)
        } else {
            Err(AuthError::Inactive)
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves an authorization header value to a user. Inactive users are
    /// still resolved; callers decide whether that is acceptable.
    async fn resolve(&self, authorization: Option<&str>) -> Result<Identity, AuthError>;
}

/// Resolves `Token <jwt>` headers against the user directory.
pub struct TokenIdentityProvider {
    tokens: Arc<TokenService>,
    users: UserClient,
}

impl TokenIdentityProvider {
    pub fn new(tokens: Arc<TokenService>, users: UserClient) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    #[instrument(skip_all)]
    async fn resolve(&self, authorization: Option<&str>) -> Result<Identity, AuthError> {
        let token = token_from_header(authorization)?;
        let claims = self.tokens.verify(token)?;

        let user = self
            .users
            .get_user(claims.id)
            .await
            .map_err(|e| AuthError::Lookup(e.to_string()))?
            .ok_or(AuthError::UnknownUser)?;

        debug!(user_id = %user.id, is_active = user.is_active, "Identity resolved");
        Ok(Identity {
            user_id: user.id,
            is_active: user.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::mock_framework::{create_mock_client, expect_get};
    use chrono::Duration;
    use secrecy::SecretString;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            SecretString::from("provider-test-secret-0123456789abcdef".to_string()),
            Duration::minutes(5),
        ))
    }

    fn user(id: &str, is_active: bool) -> User {
        User {
            id: id.to_string(),
            email: "alice@example.com".into(),
            username: "alice".into(),
            password_hash: String::new(),
            is_active,
        }
    }

    #[tokio::test]
    async fn resolves_token_through_user_directory() {
        let (inner, mut user_rx) = create_mock_client::<User>(4);
        let tokens = tokens();
        let header = format!("Token {}", tokens.issue("user_3").unwrap());
        let provider = TokenIdentityProvider::new(tokens, UserClient::new(inner));

        let task = tokio::spawn(async move { provider.resolve(Some(&header)).await });

        let (id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(id, "user_3");
        responder.send(Ok(Some(user("user_3", false)))).unwrap();

        let identity = task.await.unwrap().unwrap();
        assert_eq!(identity, Identity { user_id: "user_3".into(), is_active: false });
        assert_eq!(identity.require_active(), Err(AuthError::Inactive));
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let (inner, mut user_rx) = create_mock_client::<User>(4);
        let tokens = tokens();
        let header = format!("Token {}", tokens.issue("user_9").unwrap());
        let provider = TokenIdentityProvider::new(tokens, UserClient::new(inner));

        let task = tokio::spawn(async move { provider.resolve(Some(&header)).await });

        let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(task.await.unwrap(), Err(AuthError::UnknownUser));
    }

    #[tokio::test]
    async fn bad_header_never_reaches_directory() {
        let (inner, mut user_rx) = create_mock_client::<User>(4);
        let provider = TokenIdentityProvider::new(tokens(), UserClient::new(inner));

        assert_eq!(provider.resolve(None).await, Err(AuthError::MissingCredentials));
        assert_eq!(provider.resolve(Some("Token nope")).await, Err(AuthError::InvalidToken));

        drop(provider);
        assert!(user_rx.recv().await.is_none());
    }
}

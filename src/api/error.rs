use thiserror::Error;

use super::ErrorClass;
use crate::cart::CartError;
use crate::identity::AuthError;
use crate::ordering::OrderError;
use crate::product_actor::ProductError;
use crate::store::StoreError;
use crate::user_actor::UserError;

/// Everything a dispatched command can fail with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Response encoding failed: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Auth(e) => auth_class(e),
            ApiError::User(UserError::PasswordHash(_) | UserError::ActorCommunicationError(_)) => ErrorClass::Server,
            ApiError::User(_) => ErrorClass::Client,
            ApiError::Product(ProductError::ActorCommunicationError(_)) => ErrorClass::Server,
            ApiError::Product(_) => ErrorClass::Client,
            ApiError::Cart(_) => ErrorClass::Client,
            ApiError::Store(StoreError::Unavailable(_)) => ErrorClass::Server,
            ApiError::Store(_) => ErrorClass::Client,
            ApiError::Order(OrderError::AuthenticationRequired(e)) => auth_class(e),
            ApiError::Order(OrderError::NotFormed(_)) => ErrorClass::Client,
            ApiError::Order(OrderError::PersistenceFailure(_)) => ErrorClass::Server,
            ApiError::Encode(_) => ErrorClass::Server,
        }
    }
}

fn auth_class(error: &AuthError) -> ErrorClass {
    match error {
        AuthError::InvalidCredentials => ErrorClass::Client,
        AuthError::TokenIssue(_) | AuthError::Lookup(_) => ErrorClass::Server,
        _ => ErrorClass::Unauthorized,
    }
}

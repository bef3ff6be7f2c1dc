use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::domain::UserId;

/// Scheme word expected in front of the token, compared case-insensitively.
pub const AUTHORIZATION_PREFIX: &str = "Token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub exp: i64,
}

/// Issues and verifies HS256 tokens.
#[derive(Debug)]
pub struct TokenService {
    secret: SecretString,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        let claims = TokenClaims {
            id: user_id.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}

/// Extracts the token from an authorization header value of the form `Token <jwt>`.
///
/// Anything else (absent header, a lone word, extra words, another scheme)
/// counts as no credentials at all.
pub fn token_from_header(header: Option<&str>) -> Result<&str, AuthError> {
    let mut parts = header.ok_or(AuthError::MissingCredentials)?.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(token), None) if prefix.eq_ignore_ascii_case(AUTHORIZATION_PREFIX) => Ok(token),
        _ => Err(AuthError::MissingCredentials),
    }
}

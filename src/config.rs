//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_TOKEN_SECRET` - HS256 signing secret for auth tokens (min 32 chars)
//!
//! ## Optional
//! - `SHOP_TOKEN_TTL_SECS` - Token lifetime in seconds (default: 86400)
//! - `SHOP_MAILBOX_CAPACITY` - Actor mailbox size (default: 32)
//! - `SHOP_NOTIFY_FROM` - Sender address for notifications (default: orders@shop.local)

use chrono::Duration;
use secrecy::SecretString;
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;
const DEFAULT_MAILBOX_CAPACITY: usize = 32;
const DEFAULT_NOTIFY_FROM: &str = "orders@shop.local";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub token_secret: SecretString,
    pub token_ttl: Duration,
    pub mailbox_capacity: usize,
    pub notify_from: String,
}

impl ShopConfig {
    /// Load from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token_secret = lookup("SHOP_TOKEN_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOP_TOKEN_SECRET".to_string()))?;
        if token_secret.chars().count() < MIN_TOKEN_SECRET_LENGTH {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_TOKEN_SECRET".to_string(),
                format!("must be at least {} characters", MIN_TOKEN_SECRET_LENGTH),
            ));
        }

        let ttl_secs = parse_or(&lookup, "SHOP_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_secs <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_TOKEN_TTL_SECS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let mailbox_capacity = parse_or(&lookup, "SHOP_MAILBOX_CAPACITY", DEFAULT_MAILBOX_CAPACITY)?;
        if mailbox_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_MAILBOX_CAPACITY".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            token_secret: SecretString::from(token_secret),
            token_ttl: Duration::seconds(ttl_secs),
            mailbox_capacity,
            notify_from: lookup("SHOP_NOTIFY_FROM").unwrap_or_else(|| DEFAULT_NOTIFY_FROM.to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

//! Typed handles for talking to the actors.

#[macro_use]
mod macros;

pub mod product_client;
pub mod store_client;
pub mod user_client;

pub use product_client::*;
pub use store_client::*;
pub use user_client::*;

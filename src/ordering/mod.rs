//! Turning a user's cart into an order.
//!
//! [`place_order`] is the transaction body run by the store actor;
//! [`OrderCoordinator`] is what callers use: it authenticates, asks the store
//! to run the transaction and reports the committed order to the notifier.

pub mod coordinator;
pub mod error;
pub mod transaction;

pub use coordinator::*;
pub use error::*;
pub use transaction::*;

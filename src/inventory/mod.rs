//! Per-product stock records and the check-and-decrement used by order placement.

pub mod error;
pub mod ledger;

pub use error::*;
pub use ledger::*;

//! Per-user cart lines awaiting conversion into an order.

pub mod book;
pub mod error;

pub use book::*;
pub use error::*;

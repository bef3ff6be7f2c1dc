//! The transactional tables and the actor that owns them.

pub mod error;
pub mod service;
pub mod tables;

pub use error::*;
pub use service::*;
pub use tables::*;

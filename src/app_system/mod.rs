//! System orchestration, startup, and shutdown logic.

pub mod shop_system;
pub mod tracing;

pub use shop_system::*;
pub use self::tracing::*;

//! User directory entity: validation, uniqueness and activation.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

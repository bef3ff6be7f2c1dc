//! Business entities shared by the actors. Plain data, no actor concerns.

pub mod cart;
pub mod order;
pub mod product;
pub mod stock;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use stock::*;
pub use user::*;

pub type UserId = String;
pub type ProductId = String;
pub type StockId = String;
pub type OrderId = String;
pub type OrderItemId = String;

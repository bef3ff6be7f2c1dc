//! Transport-neutral command surface: a request goes in, a `{status, message}`
//! reply comes out. An HTTP layer would only need to pick a status code from
//! [`ErrorClass`].

pub mod dispatcher;
pub mod dto;
pub mod error;

pub use dispatcher::*;
pub use dto::*;
pub use error::*;

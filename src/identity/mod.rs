//! Who is calling: tokens, password checks, registration and login.

pub mod accounts;
pub mod error;
pub mod password;
pub mod provider;
pub mod token;

pub use accounts::*;
pub use error::*;
pub use provider::*;
pub use token::*;

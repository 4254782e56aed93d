//! User module - platform accounts, roles and suspension.

mod aggregate;
mod errors;

pub use aggregate::{User, UserStatus};
pub use errors::UserError;

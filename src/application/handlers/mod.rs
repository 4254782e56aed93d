//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler resolves the caller through the `AuthorizationGuard` first.

pub mod audit;
pub mod business;
pub mod connection;
pub mod investor;
pub mod matching;
pub mod milestone;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use audit::*;
pub use business::*;
pub use connection::*;
pub use investor::*;
pub use matching::*;
pub use milestone::*;
pub use user::*;

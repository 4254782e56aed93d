//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers take `CommandMetadata`; query handlers carry the caller
//! in the query itself.

mod authorization;
pub mod handlers;

pub use authorization::{AccessMode, AuthorizationGuard};
pub use handlers::*;

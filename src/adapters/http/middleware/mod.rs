//! HTTP middleware for axum.
//!
//! - `auth` - Authentication middleware and the `Caller` extractor

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, Caller, REQUEST_ID_HEADER};

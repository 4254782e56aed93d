//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `mock` - Static token table for tests and development tokens
//! - `oidc` - JWKS-backed JWT validation against an OIDC issuer

mod mock;
mod oidc;

pub use mock::MockSessionValidator;
pub use oidc::{OidcConfig, OidcSessionValidator};

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum REST API
//! - `auth` - OIDC/JWKS and mock session validators
//! - `ai` - Anthropic provider and match explainers
//! - `memory` - in-memory store implementing every repository port
//! - `postgres` - sqlx store implementing every repository port
//! - `reference` - sector and region tables from YAML or built-in

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod reference;

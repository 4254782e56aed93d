//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, roles, authorization predicates, errors)
//! - `audit` - Append-only audit records and the HMAC hash chain
//! - `user` - Platform users and their role/status lifecycle
//! - `business` - Business profiles and verification documents
//! - `investor` - Investor preferences
//! - `matching` - Pure scoring and ranking, dismissals, reference data
//! - `connection` - Business/investor relationship lifecycle and messages
//! - `milestone` - Deliverables nested in a connection
//! - `exchange` - Submitted/verified/rejected document exchange

pub mod audit;
pub mod business;
pub mod connection;
pub mod exchange;
pub mod foundation;
pub mod investor;
pub mod matching;
pub mod milestone;
pub mod user;

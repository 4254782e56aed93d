//! Bridgeway - investor/business matchmaking backend.
//!
//! Businesses publish profiles and go through document verification.
//! Investors state preferences and receive scored matches. A connection
//! then carries the relationship from lead to close, with messages,
//! requested documents and milestones along the way. Every mutation and
//! every denied attempt lands in a hash-chained audit log.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

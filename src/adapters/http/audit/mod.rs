//! HTTP adapter for audit log inspection.

mod handlers;
mod routes;

pub use routes::audit_routes;

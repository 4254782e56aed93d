//! HTTP adapter - the axum REST API.
//!
//! Each area has its own `dto`, `handlers` and `routes` modules. Handlers
//! translate requests into application commands and queries, and map
//! module errors through [`ApiError`].

pub mod audit;
pub mod businesses;
pub mod connections;
mod error;
pub mod matching;
pub mod middleware;
pub mod milestones;
mod router;
mod state;
pub mod users;

pub use error::{parse_id, status_for, ApiError, ErrorResponse};
pub use router::{api_router, with_http_layers};
pub use state::{AppState, MatchingSettings};

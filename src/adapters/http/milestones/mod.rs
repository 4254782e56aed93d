//! HTTP adapter for milestones nested in a connection.

mod dto;
mod handlers;
mod routes;

pub use dto::MilestoneResponse;
pub use routes::milestone_routes;

//! HTTP adapter for investor preferences and matching.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    DismissalResponse, ExplainedMatchResponse, MatchResponse, MatchesQuery, PreferencesResponse,
};
pub use routes::matching_routes;

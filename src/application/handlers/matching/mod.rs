//! Matching handlers.

mod dismiss_match;
mod explain_match;
mod get_matched_businesses;

pub use dismiss_match::{DismissMatchCommand, DismissMatchHandler, DismissMatchResult};
pub use explain_match::{ExplainMatchHandler, ExplainMatchQuery, ExplainedMatch};
pub use get_matched_businesses::{
    GetMatchedBusinessesHandler, GetMatchedBusinessesQuery, MatchedBusiness,
};

//! Milestone module - deliverables negotiated inside a connection, with an
//! optional document exchange.

mod aggregate;
mod errors;

pub use aggregate::{Milestone, MilestoneProposal, MilestoneStatus, MAX_TITLE_LENGTH};
pub use errors::MilestoneError;

#[cfg(test)]
pub(crate) use aggregate::fixtures;

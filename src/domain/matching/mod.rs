//! Matching module - compatibility scoring between investor preferences and
//! business profiles, plus dismissals.

mod dismissal;
mod errors;
mod reference;
mod scoring;

pub use dismissal::MatchDismissal;
pub use errors::MatchingError;
pub use reference::{ReferenceData, ReferenceTables, DEFAULT_REFERENCE_DATA};
pub use scoring::{
    rank, score, MatchScore, RankedMatch, ScoreBreakdown, CAPITAL_WEIGHT, LOCATION_WEIGHT,
    RISK_WEIGHT, SECTOR_WEIGHT, STAGE_WEIGHT,
};

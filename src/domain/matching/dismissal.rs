//! Investor-initiated negative feedback on a match.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BusinessId, Timestamp, UserId};

/// Permanent exclusion of one business from one investor's matches.
///
/// Keyed by `(investor_id, business_id)`; there is no undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDismissal {
    pub investor_id: UserId,
    pub business_id: BusinessId,
    pub dismissed_at: Timestamp,
}

impl MatchDismissal {
    pub fn new(investor_id: UserId, business_id: BusinessId) -> Self {
        Self {
            investor_id,
            business_id,
            dismissed_at: Timestamp::now(),
        }
    }
}

//! HTTP DTOs for preference and matching endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::businesses::BusinessResponse;
use crate::application::handlers::{ExplainedMatch, MatchedBusiness};
use crate::domain::business::BusinessStage;
use crate::domain::foundation::Timestamp;
use crate::domain::investor::{CapitalRange, InvestorPreferences, RiskAppetite};
use crate::domain::matching::{MatchDismissal, MatchScore};

/// Query parameters for `GET /matches`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchesQuery {
    /// Another investor's matches; admins only.
    #[serde(default)]
    pub investor_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferencesResponse {
    pub investor_id: String,
    pub target_sectors: Vec<String>,
    pub target_regions: Vec<String>,
    pub capital_range: CapitalRange,
    pub risk_appetite: RiskAppetite,
    pub preferred_stages: Vec<BusinessStage>,
    pub updated_at: Timestamp,
}

impl From<&InvestorPreferences> for PreferencesResponse {
    fn from(prefs: &InvestorPreferences) -> Self {
        Self {
            investor_id: prefs.investor_id().to_string(),
            target_sectors: prefs.target_sectors().to_vec(),
            target_regions: prefs.target_regions().to_vec(),
            capital_range: prefs.capital_range(),
            risk_appetite: prefs.risk_appetite(),
            preferred_stages: prefs.preferred_stages().to_vec(),
            updated_at: *prefs.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub business: BusinessResponse,
    pub score: MatchScore,
}

impl From<&MatchedBusiness> for MatchResponse {
    fn from(matched: &MatchedBusiness) -> Self {
        Self {
            business: BusinessResponse::from(&matched.business),
            score: matched.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainedMatchResponse {
    pub business: BusinessResponse,
    pub score: MatchScore,
    /// Absent when the explainer failed or timed out.
    pub explanation: Option<String>,
}

impl From<ExplainedMatch> for ExplainedMatchResponse {
    fn from(explained: ExplainedMatch) -> Self {
        Self {
            business: BusinessResponse::from(&explained.business),
            score: explained.score,
            explanation: explained.explanation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DismissalResponse {
    pub investor_id: String,
    pub business_id: String,
    pub dismissed_at: Timestamp,
    pub created: bool,
}

impl DismissalResponse {
    pub fn new(dismissal: &MatchDismissal, created: bool) -> Self {
        Self {
            investor_id: dismissal.investor_id.to_string(),
            business_id: dismissal.business_id.to_string(),
            dismissed_at: dismissal.dismissed_at,
            created,
        }
    }
}

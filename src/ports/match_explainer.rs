//! Match explanation port.
//!
//! A best-effort side channel. Callers wrap it in a timeout and fall back
//! to the numeric score when it fails.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::matching::MatchScore;

/// Everything an explainer may use. No contact or financial fields.
#[derive(Debug, Clone)]
pub struct ExplanationRequest {
    pub investor_id: UserId,
    pub business_name: String,
    pub business_sector: String,
    pub business_location: String,
    pub business_stage: String,
    pub target_sectors: Vec<String>,
    pub target_regions: Vec<String>,
    pub score: MatchScore,
}

#[async_trait]
pub trait MatchExplainer: Send + Sync {
    /// Short natural-language rationale for a score.
    async fn explain(&self, request: &ExplanationRequest) -> Result<String, DomainError>;
}

//! Match explainer adapters.
//!
//! - `AiMatchExplainer` asks an `AIProvider` for a short rationale
//! - `TemplateExplainer` renders the breakdown deterministically

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matching::{
    CAPITAL_WEIGHT, LOCATION_WEIGHT, RISK_WEIGHT, SECTOR_WEIGHT, STAGE_WEIGHT,
};
use crate::ports::{
    AIProvider, CompletionRequest, ExplanationRequest, MatchExplainer, MessageRole, RequestMetadata,
};

const SYSTEM_PROMPT: &str = "You explain investor and business match scores. \
Write two or three plain sentences. Mention the strongest and weakest factors. \
Do not invent facts that are not in the input.";

/// Explainer backed by an LLM provider.
pub struct AiMatchExplainer {
    provider: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl AiMatchExplainer {
    pub fn new(provider: Arc<dyn AIProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    fn prompt(request: &ExplanationRequest) -> String {
        let b = &request.score.breakdown;
        format!(
            "Business: {} ({}, {}, stage {}).\n\
             Investor targets sectors [{}] and regions [{}].\n\
             Score {}/100: sector {}/{}, location {}/{}, capital {}/{}, risk {}/{}, stage {}/{}.",
            request.business_name,
            request.business_sector,
            request.business_location,
            request.business_stage,
            request.target_sectors.join(", "),
            request.target_regions.join(", "),
            request.score.total,
            b.sector,
            SECTOR_WEIGHT,
            b.location,
            LOCATION_WEIGHT,
            b.capital,
            CAPITAL_WEIGHT,
            b.risk,
            RISK_WEIGHT,
            b.stage,
            STAGE_WEIGHT,
        )
    }
}

#[async_trait]
impl MatchExplainer for AiMatchExplainer {
    async fn explain(&self, request: &ExplanationRequest) -> Result<String, DomainError> {
        let completion = CompletionRequest::new(RequestMetadata::new(
            request.investor_id.clone(),
            uuid::Uuid::new_v4().to_string(),
        ))
        .with_system_prompt(SYSTEM_PROMPT)
        .with_message(MessageRole::User, Self::prompt(request))
        .with_max_tokens(self.max_tokens)
        .with_temperature(0.2);

        let response = self
            .provider
            .complete(completion)
            .await
            .map_err(|e| DomainError::new(ErrorCode::AIProviderError, e.to_string()))?;

        let text = response.content.trim();
        if text.is_empty() {
            return Err(DomainError::new(
                ErrorCode::AIProviderError,
                "Provider returned an empty explanation",
            ));
        }
        Ok(text.to_string())
    }
}

/// Deterministic explainer used when no AI provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    fn describe(points: u8, max: u8) -> &'static str {
        match points {
            p if p == max => "full",
            0 => "no",
            p if u16::from(p) * 2 >= u16::from(max) => "partial",
            _ => "weak",
        }
    }
}

#[async_trait]
impl MatchExplainer for TemplateExplainer {
    async fn explain(&self, request: &ExplanationRequest) -> Result<String, DomainError> {
        let b = &request.score.breakdown;
        let factors = [
            ("sector", b.sector, SECTOR_WEIGHT),
            ("location", b.location, LOCATION_WEIGHT),
            ("capital", b.capital, CAPITAL_WEIGHT),
            ("risk", b.risk, RISK_WEIGHT),
            ("stage", b.stage, STAGE_WEIGHT),
        ];

        let details = factors
            .iter()
            .map(|(name, points, max)| {
                format!("{} {} fit ({}/{})", Self::describe(*points, *max), name, points, max)
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "{} scores {}/100 for your preferences: {}.",
            request.business_name, request.score.total, details
        ))
    }
}

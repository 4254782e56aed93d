//! ExplainMatchHandler - score one business and ask for a narrative.
//!
//! The explainer is a side channel. A timeout or failure is logged and the
//! result carries no explanation; the score is always returned. Businesses
//! the investor dismissed, or that were rejected, are not explained.

use std::sync::Arc;
use std::time::Duration;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::business::{BusinessProfile, VerificationStatus};
use crate::domain::foundation::{BusinessId, Role, UserId};
use crate::domain::matching::{score, MatchScore, MatchingError, ReferenceData};
use crate::ports::{
    BusinessRepository, DismissalRepository, ExplanationRequest, InvestorPreferencesRepository,
    MatchExplainer,
};

#[derive(Debug, Clone)]
pub struct ExplainMatchQuery {
    pub user_id: UserId,
    pub business_id: BusinessId,
}

#[derive(Debug, Clone)]
pub struct ExplainedMatch {
    pub business: BusinessProfile,
    pub score: MatchScore,
    pub explanation: Option<String>,
}

pub struct ExplainMatchHandler {
    businesses: Arc<dyn BusinessRepository>,
    preferences: Arc<dyn InvestorPreferencesRepository>,
    dismissals: Arc<dyn DismissalRepository>,
    explainer: Arc<dyn MatchExplainer>,
    reference: Arc<ReferenceData>,
    timeout: Duration,
    guard: Arc<AuthorizationGuard>,
}

impl ExplainMatchHandler {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        preferences: Arc<dyn InvestorPreferencesRepository>,
        dismissals: Arc<dyn DismissalRepository>,
        explainer: Arc<dyn MatchExplainer>,
        reference: Arc<ReferenceData>,
        timeout: Duration,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            businesses,
            preferences,
            dismissals,
            explainer,
            reference,
            timeout,
            guard,
        }
    }

    pub async fn handle(&self, query: ExplainMatchQuery) -> Result<ExplainedMatch, MatchingError> {
        let investor = self
            .guard
            .require_role(&query.user_id, &[Role::Investor], AccessMode::Query)
            .await?;

        let prefs = self
            .preferences
            .find_by_investor(&investor.user_id)
            .await?
            .ok_or_else(|| MatchingError::PreferencesNotFound(investor.user_id.clone()))?;
        let business = self
            .businesses
            .find_by_id(&query.business_id)
            .await?
            .ok_or(MatchingError::BusinessNotFound(query.business_id))?;
        if business.verification_status() == VerificationStatus::Rejected
            || self
                .dismissals
                .dismissed_for(&investor.user_id)
                .await?
                .contains(business.id())
        {
            return Err(MatchingError::BusinessNotFound(query.business_id));
        }

        let match_score = score(&prefs, &business, &self.reference);

        let location = business.location();
        let request = ExplanationRequest {
            investor_id: investor.user_id.clone(),
            business_name: business.name().to_string(),
            business_sector: business.sector().to_string(),
            business_location: format!("{}, {}", location.state, location.country),
            business_stage: business.stage().as_str().to_string(),
            target_sectors: prefs.target_sectors().to_vec(),
            target_regions: prefs.target_regions().to_vec(),
            score: match_score,
        };

        let explained = tokio::time::timeout(self.timeout, self.explainer.explain(&request)).await;
        let explanation = match explained {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                tracing::warn!(business_id = %business.id(), error = %e, "Match explanation failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    business_id = %business.id(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Match explanation timed out"
                );
                None
            }
        };

        Ok(ExplainedMatch {
            business,
            score: match_score,
            explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::TemplateExplainer;
    use crate::application::handlers::matching::{DismissMatchCommand, DismissMatchHandler};
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::audit::{AuditAction, AuditRecord};
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::matching::DEFAULT_REFERENCE_DATA;
    use async_trait::async_trait;

    struct FailingExplainer;

    #[async_trait]
    impl MatchExplainer for FailingExplainer {
        async fn explain(&self, _request: &ExplanationRequest) -> Result<String, DomainError> {
            Err(DomainError::new(ErrorCode::AIProviderError, "provider down"))
        }
    }

    struct SlowExplainer;

    #[async_trait]
    impl MatchExplainer for SlowExplainer {
        async fn explain(&self, _request: &ExplanationRequest) -> Result<String, DomainError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    fn handler(ctx: &TestContext, explainer: Arc<dyn MatchExplainer>) -> ExplainMatchHandler {
        ExplainMatchHandler::new(
            ctx.store.clone(),
            ctx.store.clone(),
            ctx.store.clone(),
            explainer,
            Arc::new(DEFAULT_REFERENCE_DATA.clone()),
            Duration::from_millis(50),
            ctx.guard.clone(),
        )
    }

    async fn seeded(ctx: &TestContext) -> (UserId, BusinessId) {
        let investor = ctx.user("investor", Role::Investor).await;
        ctx.preferences(&investor, &["Fintech"], &["Lagos"]).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        (investor, *business.id())
    }

    #[tokio::test]
    async fn template_explanation_is_attached() {
        let ctx = TestContext::new();
        let (investor, business_id) = seeded(&ctx).await;

        let result = handler(&ctx, Arc::new(TemplateExplainer))
            .handle(ExplainMatchQuery {
                user_id: investor,
                business_id,
            })
            .await
            .unwrap();

        let text = result.explanation.unwrap();
        assert!(text.starts_with("Fintech Co scores"));
        assert!(text.contains("full sector fit (35/35)"));
    }

    #[tokio::test]
    async fn explainer_failure_is_swallowed() {
        let ctx = TestContext::new();
        let (investor, business_id) = seeded(&ctx).await;

        let result = handler(&ctx, Arc::new(FailingExplainer))
            .handle(ExplainMatchQuery {
                user_id: investor,
                business_id,
            })
            .await
            .unwrap();

        assert!(result.explanation.is_none());
        assert_eq!(result.score.breakdown.sector, 35);
    }

    #[tokio::test]
    async fn explainer_timeout_is_swallowed() {
        let ctx = TestContext::new();
        let (investor, business_id) = seeded(&ctx).await;

        let result = handler(&ctx, Arc::new(SlowExplainer))
            .handle(ExplainMatchQuery {
                user_id: investor,
                business_id,
            })
            .await
            .unwrap();

        assert!(result.explanation.is_none());
        assert!(result.score.total >= 80);
    }

    #[tokio::test]
    async fn unknown_business_is_not_found() {
        let ctx = TestContext::new();
        let (investor, _) = seeded(&ctx).await;
        let missing = BusinessId::new();

        let err = handler(&ctx, Arc::new(TemplateExplainer))
            .handle(ExplainMatchQuery {
                user_id: investor,
                business_id: missing,
            })
            .await
            .unwrap_err();
        assert_eq!(err, MatchingError::BusinessNotFound(missing));
    }

    #[tokio::test]
    async fn dismissed_business_is_not_explained() {
        let ctx = TestContext::new();
        let (investor, business_id) = seeded(&ctx).await;
        DismissMatchHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(DismissMatchCommand { business_id }, meta(&investor))
            .await
            .unwrap();

        let err = handler(&ctx, Arc::new(TemplateExplainer))
            .handle(ExplainMatchQuery {
                user_id: investor,
                business_id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, MatchingError::BusinessNotFound(business_id));
    }

    #[tokio::test]
    async fn dismissal_by_another_investor_does_not_hide_the_business() {
        let ctx = TestContext::new();
        let (investor, business_id) = seeded(&ctx).await;
        let other = ctx.user("other-investor", Role::Investor).await;
        DismissMatchHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(DismissMatchCommand { business_id }, meta(&other))
            .await
            .unwrap();

        let result = handler(&ctx, Arc::new(TemplateExplainer))
            .handle(ExplainMatchQuery {
                user_id: investor,
                business_id,
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejected_business_is_not_explained() {
        let ctx = TestContext::new();
        let (investor, business_id) = seeded(&ctx).await;
        let mut business = BusinessRepository::find_by_id(ctx.store.as_ref(), &business_id)
            .await
            .unwrap()
            .unwrap();
        let officer = ctx.user("officer", Role::VerificationOfficer).await;
        business.submit_for_verification().unwrap();
        BusinessRepository::update(
            ctx.store.as_ref(),
            &business,
            &AuditRecord::by(business.owner_id(), AuditAction::BusinessSubmittedForVerification),
        )
        .await
        .unwrap();
        business
            .update_verification(VerificationStatus::Rejected, None)
            .unwrap();
        BusinessRepository::update(
            ctx.store.as_ref(),
            &business,
            &AuditRecord::by(&officer, AuditAction::BusinessVerificationUpdated),
        )
        .await
        .unwrap();

        let err = handler(&ctx, Arc::new(TemplateExplainer))
            .handle(ExplainMatchQuery {
                user_id: investor,
                business_id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, MatchingError::BusinessNotFound(business_id));
    }
}

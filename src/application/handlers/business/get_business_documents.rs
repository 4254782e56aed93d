//! GetBusinessDocumentsHandler - Query handler for a business's documents.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::business::{BusinessError, VerificationDocument};
use crate::domain::foundation::{check_role, BusinessId, Role, UserId};
use crate::ports::{BusinessRepository, VerificationDocumentRepository};

use super::REVIEWERS;

#[derive(Debug, Clone)]
pub struct GetBusinessDocumentsQuery {
    pub user_id: UserId,
    pub business_id: BusinessId,
}

pub struct GetBusinessDocumentsHandler {
    businesses: Arc<dyn BusinessRepository>,
    documents: Arc<dyn VerificationDocumentRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl GetBusinessDocumentsHandler {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        documents: Arc<dyn VerificationDocumentRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            businesses,
            documents,
            guard,
        }
    }

    /// Visible to the owner, verifiers, and regulators covering the business.
    pub async fn handle(
        &self,
        query: GetBusinessDocumentsQuery,
    ) -> Result<Vec<VerificationDocument>, BusinessError> {
        let principal = self.guard.resolve_principal(&query.user_id).await?;
        let business = self
            .businesses
            .find_by_id(&query.business_id)
            .await?
            .ok_or(BusinessError::NotFound(query.business_id))?;

        if !business.is_owner(&principal.user_id) {
            self.guard
                .enforce(&principal, check_role(&principal, &REVIEWERS), AccessMode::Query, None)
                .await?;
            if principal.role == Role::Regulator {
                self.guard
                    .require_business_jurisdiction(&principal, &business, AccessMode::Query)
                    .await?;
            }
        }

        Ok(self.documents.list_by_business(business.id()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::business::{
        UploadVerificationDocumentCommand, UploadVerificationDocumentHandler,
    };
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::business::{BusinessProfile, DocumentCategory};

    async fn business_with_document(ctx: &TestContext) -> BusinessProfile {
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        UploadVerificationDocumentHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(
                UploadVerificationDocumentCommand {
                    business_id: *business.id(),
                    document_type: "tax_clearance".to_string(),
                    category: DocumentCategory::Core,
                    file_ref: "s3://kyc/tax.pdf".to_string(),
                },
                meta(&owner),
            )
            .await
            .unwrap();
        business
    }

    async fn list(
        ctx: &TestContext,
        business: &BusinessProfile,
        caller: &UserId,
    ) -> Result<Vec<VerificationDocument>, BusinessError> {
        GetBusinessDocumentsHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(GetBusinessDocumentsQuery {
                user_id: caller.clone(),
                business_id: *business.id(),
            })
            .await
    }

    #[tokio::test]
    async fn owner_and_officer_can_list() {
        let ctx = TestContext::new();
        let business = business_with_document(&ctx).await;
        let officer = ctx.user("officer", Role::VerificationOfficer).await;

        assert_eq!(list(&ctx, &business, business.owner_id()).await.unwrap().len(), 1);
        assert_eq!(list(&ctx, &business, &officer).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn regulator_outside_jurisdiction_is_denied_without_audit() {
        let ctx = TestContext::new();
        let business = business_with_document(&ctx).await;
        let reg = ctx.regulator("reg", "Kano").await;
        let before = ctx.store.audit_len().await;

        let err = list(&ctx, &business, &reg).await.unwrap_err();

        assert!(matches!(err, BusinessError::Unauthorized(_)));
        assert_eq!(ctx.store.audit_len().await, before);
    }

    #[tokio::test]
    async fn investor_is_denied() {
        let ctx = TestContext::new();
        let business = business_with_document(&ctx).await;
        let investor = ctx.user("investor", Role::Investor).await;

        let err = list(&ctx, &business, &investor).await.unwrap_err();
        assert!(matches!(err, BusinessError::Unauthorized(_)));
    }
}

//! Shared state for all API routes.
//!
//! Holds the ports and builds application handlers on demand.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::*;
use crate::application::AuthorizationGuard;
use crate::domain::audit::AuditSigner;
use crate::domain::foundation::UserId;
use crate::domain::matching::ReferenceData;
use crate::ports::{
    AuditLog, BusinessRepository, ConnectionRepository, DismissalRepository,
    InvestorPreferencesRepository, MatchExplainer, MessageRepository, MilestoneRepository,
    UserRepository, VerificationDocumentRepository,
};

/// Matching knobs taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct MatchingSettings {
    pub min_score: u8,
    pub explain_timeout: Duration,
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub documents: Arc<dyn VerificationDocumentRepository>,
    pub preferences: Arc<dyn InvestorPreferencesRepository>,
    pub dismissals: Arc<dyn DismissalRepository>,
    pub connections: Arc<dyn ConnectionRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub milestones: Arc<dyn MilestoneRepository>,
    pub audit_log: Arc<dyn AuditLog>,
    pub guard: Arc<AuthorizationGuard>,
    pub signer: AuditSigner,
    pub explainer: Arc<dyn MatchExplainer>,
    pub reference: Arc<ReferenceData>,
    pub matching: MatchingSettings,
    pub bootstrap_admins: Arc<HashSet<UserId>>,
}

impl AppState {
    /// Builds the state from one store implementing every repository port.
    pub fn from_store<S>(
        store: Arc<S>,
        signer: AuditSigner,
        explainer: Arc<dyn MatchExplainer>,
        reference: Arc<ReferenceData>,
        matching: MatchingSettings,
    ) -> Self
    where
        S: UserRepository
            + BusinessRepository
            + VerificationDocumentRepository
            + InvestorPreferencesRepository
            + DismissalRepository
            + ConnectionRepository
            + MessageRepository
            + MilestoneRepository
            + AuditLog
            + 'static,
    {
        let users: Arc<dyn UserRepository> = store.clone();
        let audit_log: Arc<dyn AuditLog> = store.clone();
        Self {
            guard: Arc::new(AuthorizationGuard::new(users.clone(), audit_log.clone())),
            users,
            audit_log,
            businesses: store.clone(),
            documents: store.clone(),
            preferences: store.clone(),
            dismissals: store.clone(),
            connections: store.clone(),
            messages: store.clone(),
            milestones: store,
            signer,
            explainer,
            reference,
            matching,
            bootstrap_admins: Arc::default(),
        }
    }

    pub fn with_bootstrap_admins(mut self, subjects: HashSet<UserId>) -> Self {
        self.bootstrap_admins = Arc::new(subjects);
        self
    }

    // ─── Users & audit ──────────────────────────────────────────────────────

    pub fn provision_user_handler(&self) -> ProvisionUserHandler {
        ProvisionUserHandler::new(self.users.clone())
            .with_bootstrap_admins(self.bootstrap_admins.clone())
    }

    pub fn get_current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone())
    }

    pub fn update_user_role_handler(&self) -> UpdateUserRoleHandler {
        UpdateUserRoleHandler::new(self.users.clone(), self.guard.clone())
    }

    pub fn update_user_status_handler(&self) -> UpdateUserStatusHandler {
        UpdateUserStatusHandler::new(self.users.clone(), self.guard.clone())
    }

    pub fn list_audit_log_handler(&self) -> ListAuditLogHandler {
        ListAuditLogHandler::new(self.audit_log.clone(), self.guard.clone())
    }

    pub fn verify_audit_chain_handler(&self) -> VerifyAuditChainHandler {
        VerifyAuditChainHandler::new(self.audit_log.clone(), self.signer.clone(), self.guard.clone())
    }

    // ─── Businesses & verification ──────────────────────────────────────────

    pub fn save_business_profile_handler(&self) -> SaveBusinessProfileHandler {
        SaveBusinessProfileHandler::new(self.businesses.clone(), self.guard.clone())
    }

    pub fn submit_for_verification_handler(&self) -> SubmitForVerificationHandler {
        SubmitForVerificationHandler::new(self.businesses.clone(), self.guard.clone())
    }

    pub fn get_pending_businesses_handler(&self) -> GetPendingBusinessesHandler {
        GetPendingBusinessesHandler::new(self.businesses.clone(), self.guard.clone())
    }

    pub fn update_business_verification_handler(&self) -> UpdateBusinessVerificationHandler {
        UpdateBusinessVerificationHandler::new(self.businesses.clone(), self.guard.clone())
    }

    pub fn upload_verification_document_handler(&self) -> UploadVerificationDocumentHandler {
        UploadVerificationDocumentHandler::new(
            self.businesses.clone(),
            self.documents.clone(),
            self.guard.clone(),
        )
    }

    pub fn get_business_documents_handler(&self) -> GetBusinessDocumentsHandler {
        GetBusinessDocumentsHandler::new(
            self.businesses.clone(),
            self.documents.clone(),
            self.guard.clone(),
        )
    }

    pub fn review_verification_document_handler(&self) -> ReviewVerificationDocumentHandler {
        ReviewVerificationDocumentHandler::new(self.documents.clone(), self.guard.clone())
    }

    // ─── Matching ───────────────────────────────────────────────────────────

    pub fn save_investor_preferences_handler(&self) -> SaveInvestorPreferencesHandler {
        SaveInvestorPreferencesHandler::new(self.preferences.clone(), self.guard.clone())
    }

    pub fn get_matched_businesses_handler(&self) -> GetMatchedBusinessesHandler {
        GetMatchedBusinessesHandler::new(
            self.businesses.clone(),
            self.preferences.clone(),
            self.dismissals.clone(),
            self.reference.clone(),
            self.matching.min_score,
            self.guard.clone(),
        )
    }

    pub fn dismiss_match_handler(&self) -> DismissMatchHandler {
        DismissMatchHandler::new(self.businesses.clone(), self.dismissals.clone(), self.guard.clone())
    }

    pub fn explain_match_handler(&self) -> ExplainMatchHandler {
        ExplainMatchHandler::new(
            self.businesses.clone(),
            self.preferences.clone(),
            self.dismissals.clone(),
            self.explainer.clone(),
            self.reference.clone(),
            self.matching.explain_timeout,
            self.guard.clone(),
        )
    }

    // ─── Connections & messages ─────────────────────────────────────────────

    pub fn initiate_connection_handler(&self) -> InitiateConnectionHandler {
        InitiateConnectionHandler::new(
            self.businesses.clone(),
            self.connections.clone(),
            self.guard.clone(),
        )
    }

    pub fn get_my_connections_handler(&self) -> GetMyConnectionsHandler {
        GetMyConnectionsHandler::new(self.connections.clone(), self.guard.clone())
    }

    pub fn get_connection_handler(&self) -> GetConnectionHandler {
        GetConnectionHandler::new(self.connections.clone(), self.guard.clone())
    }

    pub fn advance_connection_handler(&self) -> AdvanceConnectionHandler {
        AdvanceConnectionHandler::new(self.connections.clone(), self.guard.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.connections.clone(), self.messages.clone(), self.guard.clone())
    }

    pub fn list_messages_handler(&self) -> ListMessagesHandler {
        ListMessagesHandler::new(self.connections.clone(), self.messages.clone(), self.guard.clone())
    }

    pub fn request_document_handler(&self) -> RequestDocumentHandler {
        RequestDocumentHandler::new(self.connections.clone(), self.messages.clone(), self.guard.clone())
    }

    pub fn submit_requested_document_handler(&self) -> SubmitRequestedDocumentHandler {
        SubmitRequestedDocumentHandler::new(
            self.connections.clone(),
            self.messages.clone(),
            self.guard.clone(),
        )
    }

    pub fn verify_requested_document_handler(&self) -> VerifyRequestedDocumentHandler {
        VerifyRequestedDocumentHandler::new(
            self.connections.clone(),
            self.messages.clone(),
            self.guard.clone(),
        )
    }

    // ─── Milestones ─────────────────────────────────────────────────────────

    pub fn propose_milestone_handler(&self) -> ProposeMilestoneHandler {
        ProposeMilestoneHandler::new(self.connections.clone(), self.milestones.clone(), self.guard.clone())
    }

    pub fn list_milestones_handler(&self) -> ListMilestonesHandler {
        ListMilestonesHandler::new(self.connections.clone(), self.milestones.clone(), self.guard.clone())
    }

    pub fn agree_to_milestone_handler(&self) -> AgreeToMilestoneHandler {
        AgreeToMilestoneHandler::new(self.connections.clone(), self.milestones.clone(), self.guard.clone())
    }

    pub fn submit_milestone_document_handler(&self) -> SubmitMilestoneDocumentHandler {
        SubmitMilestoneDocumentHandler::new(
            self.connections.clone(),
            self.milestones.clone(),
            self.guard.clone(),
        )
    }

    pub fn verify_milestone_document_handler(&self) -> VerifyMilestoneDocumentHandler {
        VerifyMilestoneDocumentHandler::new(
            self.connections.clone(),
            self.milestones.clone(),
            self.guard.clone(),
        )
    }
}

//! Audited action vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DenialKind, ValidationError};

/// Every action that produces an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    // Access control
    UnauthorizedRoleEscalationAttempt,
    UnauthorizedJurisdictionAccessAttempt,
    UnauthorizedParticipantAccessAttempt,

    // Users
    UserProvisioned,
    UserRoleUpdated,
    UserStatusUpdated,

    // Business profiles and verification
    BusinessProfileCreated,
    BusinessProfileUpdated,
    BusinessSubmittedForVerification,
    BusinessVerificationUpdated,
    VerificationDocumentUploaded,
    VerificationDocumentApproved,
    VerificationDocumentRejected,
    VerificationDocumentExpired,

    // Investors and matching
    InvestorPreferencesSaved,
    MatchDismissed,

    // Connections
    ConnectionInitiated,
    ConnectionStatusChanged,
    MessageSent,
    DocumentRequested,
    RequestedDocumentSubmitted,
    RequestedDocumentReviewed,

    // Milestones
    MilestoneProposed,
    MilestoneAgreed,
    MilestoneDocumentSubmitted,
    MilestoneDocumentReviewed,
}

impl AuditAction {
    pub const ALL: [AuditAction; 26] = [
        AuditAction::UnauthorizedRoleEscalationAttempt,
        AuditAction::UnauthorizedJurisdictionAccessAttempt,
        AuditAction::UnauthorizedParticipantAccessAttempt,
        AuditAction::UserProvisioned,
        AuditAction::UserRoleUpdated,
        AuditAction::UserStatusUpdated,
        AuditAction::BusinessProfileCreated,
        AuditAction::BusinessProfileUpdated,
        AuditAction::BusinessSubmittedForVerification,
        AuditAction::BusinessVerificationUpdated,
        AuditAction::VerificationDocumentUploaded,
        AuditAction::VerificationDocumentApproved,
        AuditAction::VerificationDocumentRejected,
        AuditAction::VerificationDocumentExpired,
        AuditAction::InvestorPreferencesSaved,
        AuditAction::MatchDismissed,
        AuditAction::ConnectionInitiated,
        AuditAction::ConnectionStatusChanged,
        AuditAction::MessageSent,
        AuditAction::DocumentRequested,
        AuditAction::RequestedDocumentSubmitted,
        AuditAction::RequestedDocumentReviewed,
        AuditAction::MilestoneProposed,
        AuditAction::MilestoneAgreed,
        AuditAction::MilestoneDocumentSubmitted,
        AuditAction::MilestoneDocumentReviewed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::UnauthorizedRoleEscalationAttempt => "UNAUTHORIZED_ROLE_ESCALATION_ATTEMPT",
            AuditAction::UnauthorizedJurisdictionAccessAttempt => {
                "UNAUTHORIZED_JURISDICTION_ACCESS_ATTEMPT"
            }
            AuditAction::UnauthorizedParticipantAccessAttempt => {
                "UNAUTHORIZED_PARTICIPANT_ACCESS_ATTEMPT"
            }
            AuditAction::UserProvisioned => "USER_PROVISIONED",
            AuditAction::UserRoleUpdated => "USER_ROLE_UPDATED",
            AuditAction::UserStatusUpdated => "USER_STATUS_UPDATED",
            AuditAction::BusinessProfileCreated => "BUSINESS_PROFILE_CREATED",
            AuditAction::BusinessProfileUpdated => "BUSINESS_PROFILE_UPDATED",
            AuditAction::BusinessSubmittedForVerification => "BUSINESS_SUBMITTED_FOR_VERIFICATION",
            AuditAction::BusinessVerificationUpdated => "BUSINESS_VERIFICATION_UPDATED",
            AuditAction::VerificationDocumentUploaded => "VERIFICATION_DOCUMENT_UPLOADED",
            AuditAction::VerificationDocumentApproved => "VERIFICATION_DOCUMENT_APPROVED",
            AuditAction::VerificationDocumentRejected => "VERIFICATION_DOCUMENT_REJECTED",
            AuditAction::VerificationDocumentExpired => "VERIFICATION_DOCUMENT_EXPIRED",
            AuditAction::InvestorPreferencesSaved => "INVESTOR_PREFERENCES_SAVED",
            AuditAction::MatchDismissed => "MATCH_DISMISSED",
            AuditAction::ConnectionInitiated => "CONNECTION_INITIATED",
            AuditAction::ConnectionStatusChanged => "CONNECTION_STATUS_CHANGED",
            AuditAction::MessageSent => "MESSAGE_SENT",
            AuditAction::DocumentRequested => "DOCUMENT_REQUESTED",
            AuditAction::RequestedDocumentSubmitted => "REQUESTED_DOCUMENT_SUBMITTED",
            AuditAction::RequestedDocumentReviewed => "REQUESTED_DOCUMENT_REVIEWED",
            AuditAction::MilestoneProposed => "MILESTONE_PROPOSED",
            AuditAction::MilestoneAgreed => "MILESTONE_AGREED",
            AuditAction::MilestoneDocumentSubmitted => "MILESTONE_DOCUMENT_SUBMITTED",
            AuditAction::MilestoneDocumentReviewed => "MILESTONE_DOCUMENT_REVIEWED",
        }
    }

    /// Audit action recorded for an authorization denial.
    pub fn for_denial(kind: DenialKind) -> Self {
        match kind {
            DenialKind::Role => AuditAction::UnauthorizedRoleEscalationAttempt,
            DenialKind::Jurisdiction => AuditAction::UnauthorizedJurisdictionAccessAttempt,
            DenialKind::Participant => AuditAction::UnauthorizedParticipantAccessAttempt,
        }
    }

    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            AuditAction::UnauthorizedRoleEscalationAttempt
                | AuditAction::UnauthorizedJurisdictionAccessAttempt
                | AuditAction::UnauthorizedParticipantAccessAttempt
        )
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditAction::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("action", format!("unknown audit action '{}'", s))
            })
    }
}

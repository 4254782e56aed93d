//! Verification documents attached to a business profile.
//!
//! Reviews are final: approving or rejecting a document that is no longer
//! pending fails, and the owner uploads a fresh document instead.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BusinessId, DocumentId, DomainError, StateMachine, Timestamp, UserId, ValidationError,
};

/// Review status of a verification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Verified,
    Rejected,
    Expired,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Verified => "verified",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DocumentStatus::Pending),
            "verified" => Some(DocumentStatus::Verified),
            "rejected" => Some(DocumentStatus::Rejected),
            "expired" => Some(DocumentStatus::Expired),
            _ => None,
        }
    }
}

impl StateMachine for DocumentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DocumentStatus::*;
        match self {
            Pending => vec![Verified, Rejected],
            Verified => vec![Expired],
            Rejected | Expired => vec![],
        }
    }
}

/// Grouping used by the verification checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Core,
    SectorSpecific,
    Additional,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Core => "core",
            DocumentCategory::SectorSpecific => "sector_specific",
            DocumentCategory::Additional => "additional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "core" => Some(DocumentCategory::Core),
            "sector_specific" => Some(DocumentCategory::SectorSpecific),
            "additional" => Some(DocumentCategory::Additional),
            _ => None,
        }
    }
}

/// A KYC-style document uploaded by a business owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDocument {
    id: DocumentId,
    business_id: BusinessId,
    uploaded_by: UserId,
    document_type: String,
    category: DocumentCategory,
    file_ref: String,
    status: DocumentStatus,
    rejection_reason: Option<String>,
    reviewed_by: Option<UserId>,
    reviewed_at: Option<Timestamp>,
    uploaded_at: Timestamp,
    version: u64,
}

impl VerificationDocument {
    /// Records an upload awaiting review.
    ///
    /// `file_ref` is an opaque storage reference and is only checked for
    /// being non-empty.
    pub fn upload(
        business_id: BusinessId,
        uploaded_by: UserId,
        document_type: impl Into<String>,
        category: DocumentCategory,
        file_ref: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let document_type = document_type.into();
        let file_ref = file_ref.into();
        if document_type.trim().is_empty() {
            return Err(ValidationError::empty_field("document_type").into());
        }
        if file_ref.trim().is_empty() {
            return Err(ValidationError::empty_field("file_ref").into());
        }
        Ok(Self {
            id: DocumentId::new(),
            business_id,
            uploaded_by,
            document_type,
            category,
            file_ref,
            status: DocumentStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            uploaded_at: Timestamp::now(),
            version: 1,
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DocumentId,
        business_id: BusinessId,
        uploaded_by: UserId,
        document_type: String,
        category: DocumentCategory,
        file_ref: String,
        status: DocumentStatus,
        rejection_reason: Option<String>,
        reviewed_by: Option<UserId>,
        reviewed_at: Option<Timestamp>,
        uploaded_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            business_id,
            uploaded_by,
            document_type,
            category,
            file_ref,
            status,
            rejection_reason,
            reviewed_by,
            reviewed_at,
            uploaded_at,
            version,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn business_id(&self) -> &BusinessId {
        &self.business_id
    }

    pub fn uploaded_by(&self) -> &UserId {
        &self.uploaded_by
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn category(&self) -> DocumentCategory {
        self.category
    }

    pub fn file_ref(&self) -> &str {
        &self.file_ref
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn reviewed_by(&self) -> Option<&UserId> {
        self.reviewed_by.as_ref()
    }

    pub fn reviewed_at(&self) -> Option<&Timestamp> {
        self.reviewed_at.as_ref()
    }

    pub fn uploaded_at(&self) -> &Timestamp {
        &self.uploaded_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// `pending -> verified`.
    pub fn approve(&mut self, reviewer: &UserId) -> Result<DocumentStatus, DomainError> {
        self.review(reviewer, DocumentStatus::Verified, None)
    }

    /// `pending -> rejected`, keeping the reason.
    pub fn reject(&mut self, reviewer: &UserId, reason: &str) -> Result<DocumentStatus, DomainError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::empty_field("reason").into());
        }
        self.review(reviewer, DocumentStatus::Rejected, Some(reason.to_string()))
    }

    /// `verified -> expired`.
    pub fn expire(&mut self, reviewer: &UserId) -> Result<DocumentStatus, DomainError> {
        self.review(reviewer, DocumentStatus::Expired, None)
    }

    fn review(
        &mut self,
        reviewer: &UserId,
        target: DocumentStatus,
        reason: Option<String>,
    ) -> Result<DocumentStatus, DomainError> {
        let previous = self.status;
        self.status = previous.transition_to(target)?;
        if reason.is_some() {
            self.rejection_reason = reason;
        }
        self.reviewed_by = Some(reviewer.clone());
        self.reviewed_at = Some(Timestamp::now());
        self.version += 1;
        Ok(previous)
    }
}

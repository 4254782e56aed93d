//! HTTP DTOs for business and verification document endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::business::{
    BusinessProfile, BusinessStage, DocumentCategory, DocumentStatus, Location, VerificationDocument,
    VerificationStatus,
};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVerificationRequest {
    pub status: VerificationStatus,
    #[serde(default)]
    pub credibility_score: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadDocumentRequest {
    pub document_type: String,
    pub category: DocumentCategory,
    /// Opaque object storage reference.
    pub file_ref: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RejectDocumentRequest {
    pub reason: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct BusinessResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub sector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsector: Option<String>,
    pub secondary_sectors: Vec<String>,
    pub location: Location,
    pub stage: BusinessStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_ask: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub verification_status: VerificationStatus,
    pub credibility_score: u8,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&BusinessProfile> for BusinessResponse {
    fn from(business: &BusinessProfile) -> Self {
        let details = business.details();
        Self {
            id: business.id().to_string(),
            owner_id: business.owner_id().to_string(),
            name: business.name().to_string(),
            sector: business.sector().to_string(),
            subsector: business.subsector().map(str::to_string),
            secondary_sectors: business.secondary_sectors().to_vec(),
            location: business.location().clone(),
            stage: business.stage(),
            funding_ask: business.funding_ask(),
            annual_revenue: details.annual_revenue,
            contact_email: details.contact_email.clone(),
            description: details.description.clone(),
            verification_status: business.verification_status(),
            credibility_score: business.credibility_score(),
            created_at: *business.created_at(),
            updated_at: *business.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveBusinessResponse {
    pub business: BusinessResponse,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub business_id: String,
    pub uploaded_by: String,
    pub document_type: String,
    pub category: DocumentCategory,
    pub file_ref: String,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<Timestamp>,
    pub uploaded_at: Timestamp,
}

impl From<&VerificationDocument> for DocumentResponse {
    fn from(doc: &VerificationDocument) -> Self {
        Self {
            id: doc.id().to_string(),
            business_id: doc.business_id().to_string(),
            uploaded_by: doc.uploaded_by().to_string(),
            document_type: doc.document_type().to_string(),
            category: doc.category(),
            file_ref: doc.file_ref().to_string(),
            status: doc.status(),
            rejection_reason: doc.rejection_reason().map(str::to_string),
            reviewed_by: doc.reviewed_by().map(ToString::to_string),
            reviewed_at: doc.reviewed_at().copied(),
            uploaded_at: *doc.uploaded_at(),
        }
    }
}

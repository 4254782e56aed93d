//! HTTP DTOs for milestone endpoints.
//!
//! Proposals are accepted as [`MilestoneProposal`] directly; document
//! submission and review reuse the connection request bodies.
//!
//! [`MilestoneProposal`]: crate::domain::milestone::MilestoneProposal

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::exchange::DocumentExchange;
use crate::domain::foundation::Timestamp;
use crate::domain::milestone::{Milestone, MilestoneStatus};

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneResponse {
    pub id: String,
    pub connection_id: String,
    pub proposed_by: String,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub status: MilestoneStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_at: Option<Timestamp>,
    pub requires_document: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
    pub document: DocumentExchange,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Milestone> for MilestoneResponse {
    fn from(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id().to_string(),
            connection_id: milestone.connection_id().to_string(),
            proposed_by: milestone.proposed_by().to_string(),
            title: milestone.title().to_string(),
            description: milestone.description().to_string(),
            deadline: milestone.deadline(),
            status: milestone.status(),
            agreed_by: milestone.agreed_by().map(ToString::to_string),
            agreed_at: milestone.agreed_at().copied(),
            requires_document: milestone.requires_document(),
            document_type: milestone.document_type().map(str::to_string),
            template_url: milestone.template_url().map(str::to_string),
            document: milestone.document().clone(),
            created_at: *milestone.created_at(),
            updated_at: *milestone.updated_at(),
        }
    }
}

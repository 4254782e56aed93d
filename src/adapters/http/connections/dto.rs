//! HTTP DTOs for connection endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::connection::{Connection, ConnectionMessage, ConnectionStatus, MessageKind, StatusChange};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct InitiateConnectionRequest {
    pub business_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvanceConnectionRequest {
    pub status: ConnectionStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestDocumentRequest {
    pub document_type: String,
    #[serde(default)]
    pub template_url: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Shared by requested documents and milestone documents.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDocumentRequest {
    pub document_url: String,
}

/// Shared by requested documents and milestone documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDocumentRequest {
    pub approved: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionResponse {
    pub id: String,
    pub business_id: String,
    pub business_owner_id: String,
    pub investor_id: String,
    pub status: ConnectionStatus,
    pub status_history: Vec<StatusChange>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Connection> for ConnectionResponse {
    fn from(connection: &Connection) -> Self {
        Self {
            id: connection.id().to_string(),
            business_id: connection.business_id().to_string(),
            business_owner_id: connection.business_owner_id().to_string(),
            investor_id: connection.investor_id().to_string(),
            status: connection.status(),
            status_history: connection.status_history().to_vec(),
            created_at: *connection.created_at(),
            updated_at: *connection.updated_at(),
        }
    }
}

/// A message; document requests carry `type = "document_request"` and
/// their exchange state inline.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub connection_id: String,
    pub sender_id: String,
    pub body: String,
    #[serde(flatten)]
    pub kind: MessageKind,
    pub sent_at: Timestamp,
}

impl From<&ConnectionMessage> for MessageResponse {
    fn from(message: &ConnectionMessage) -> Self {
        Self {
            id: message.id().to_string(),
            connection_id: message.connection_id().to_string(),
            sender_id: message.sender_id().to_string(),
            body: message.body().to_string(),
            kind: message.kind().clone(),
            sent_at: *message.sent_at(),
        }
    }
}

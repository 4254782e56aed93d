//! Append-only messages inside a connection.

use serde::{Deserialize, Serialize};

use crate::domain::exchange::DocumentExchange;
use crate::domain::foundation::{
    ConnectionId, DomainError, MessageId, Timestamp, UserId, ValidationError,
};

pub const MAX_BODY_LENGTH: usize = 10_000;

/// A connection-level request for an ad-hoc document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub document_type: String,
    pub template_url: Option<String>,
    pub exchange: DocumentExchange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    DocumentRequest(DocumentRequest),
}

/// A message in a connection thread.
///
/// The body never changes after sending. Only the exchange of a
/// document request moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMessage {
    id: MessageId,
    connection_id: ConnectionId,
    sender_id: UserId,
    body: String,
    kind: MessageKind,
    sent_at: Timestamp,
    version: u64,
}

impl ConnectionMessage {
    pub fn text(
        connection_id: ConnectionId,
        sender_id: UserId,
        body: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let body = validate_body(body.into())?;
        Ok(Self::build(connection_id, sender_id, body, MessageKind::Text))
    }

    /// Creates a document request.
    ///
    /// The body defaults to a short description of the request.
    pub fn document_request(
        connection_id: ConnectionId,
        requester: UserId,
        document_type: impl Into<String>,
        template_url: Option<String>,
        note: Option<String>,
    ) -> Result<Self, DomainError> {
        let document_type = document_type.into().trim().to_string();
        if document_type.is_empty() {
            return Err(ValidationError::empty_field("document_type").into());
        }
        let body = match note {
            Some(note) if !note.trim().is_empty() => validate_body(note)?,
            _ => format!("Requested document: {}", document_type),
        };
        let template_url = template_url.filter(|u| !u.trim().is_empty());
        Ok(Self::build(
            connection_id,
            requester,
            body,
            MessageKind::DocumentRequest(DocumentRequest {
                document_type,
                template_url,
                exchange: DocumentExchange::new(),
            }),
        ))
    }

    fn build(connection_id: ConnectionId, sender_id: UserId, body: String, kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            connection_id,
            sender_id,
            body,
            kind,
            sent_at: Timestamp::now(),
            version: 1,
        }
    }

    pub fn reconstitute(
        id: MessageId,
        connection_id: ConnectionId,
        sender_id: UserId,
        body: String,
        kind: MessageKind,
        sent_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            connection_id,
            sender_id,
            body,
            kind,
            sent_at,
            version,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }

    pub fn sent_at(&self) -> &Timestamp {
        &self.sent_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn request(&self) -> Option<&DocumentRequest> {
        match &self.kind {
            MessageKind::DocumentRequest(request) => Some(request),
            MessageKind::Text => None,
        }
    }

    /// Submits the requested document.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` for text messages or when a submission is
    ///   pending or already verified
    pub fn submit_document(&mut self, document_url: impl Into<String>, by: &UserId) -> Result<(), DomainError> {
        self.exchange_mut()?.submit(document_url, by)?;
        self.version += 1;
        Ok(())
    }

    /// Reviews the submitted document.
    pub fn review_document(&mut self, approved: bool, by: &UserId) -> Result<(), DomainError> {
        self.exchange_mut()?.review(approved, by)?;
        self.version += 1;
        Ok(())
    }

    fn exchange_mut(&mut self) -> Result<&mut DocumentExchange, DomainError> {
        match &mut self.kind {
            MessageKind::DocumentRequest(request) => Ok(&mut request.exchange),
            MessageKind::Text => Err(DomainError::invalid_transition(
                "Message is not a document request",
            )),
        }
    }
}

fn validate_body(body: String) -> Result<String, ValidationError> {
    let body = body.trim().to_string();
    if body.is_empty() {
        return Err(ValidationError::empty_field("body"));
    }
    if body.len() > MAX_BODY_LENGTH {
        return Err(ValidationError::out_of_range(
            "body",
            1,
            MAX_BODY_LENGTH as i64,
            body.len() as i64,
        ));
    }
    Ok(body)
}

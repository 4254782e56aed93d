//! Milestone aggregate - an agreed deliverable inside a connection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::connection::Connection;
use crate::domain::exchange::{DocumentExchange, ExchangeStatus};
use crate::domain::foundation::{
    ConnectionId, DomainError, MilestoneId, StateMachine, Timestamp, UserId, ValidationError,
};

pub const MAX_TITLE_LENGTH: usize = 200;

/// Negotiation status. `agreed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Proposed,
    Agreed,
}

impl MilestoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Proposed => "proposed",
            MilestoneStatus::Agreed => "agreed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(MilestoneStatus::Proposed),
            "agreed" => Some(MilestoneStatus::Agreed),
            _ => None,
        }
    }
}

impl StateMachine for MilestoneStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (MilestoneStatus::Proposed, MilestoneStatus::Agreed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            MilestoneStatus::Proposed => vec![MilestoneStatus::Agreed],
            MilestoneStatus::Agreed => vec![],
        }
    }
}

/// Proposal fields supplied by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneProposal {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub requires_document: bool,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub template_url: Option<String>,
}

/// Milestone aggregate.
///
/// # Invariants
///
/// - Created only on a connection that is not closed
/// - Agreed only by the counter-party of the proposer
/// - Document status reaches verified/rejected only from submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    id: MilestoneId,
    connection_id: ConnectionId,
    proposed_by: UserId,
    title: String,
    description: String,
    deadline: NaiveDate,
    status: MilestoneStatus,
    agreed_by: Option<UserId>,
    agreed_at: Option<Timestamp>,
    requires_document: bool,
    document_type: Option<String>,
    template_url: Option<String>,
    document: DocumentExchange,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl Milestone {
    /// Creates a milestone at `proposed`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` when the connection is closed
    /// - `EmptyField` for a blank title
    /// - `OutOfRange` when the deadline is before `today`
    pub fn propose(
        id: MilestoneId,
        connection: &Connection,
        proposed_by: UserId,
        proposal: MilestoneProposal,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        if connection.is_closed() {
            return Err(DomainError::invalid_transition(
                "Cannot propose milestones on a closed connection",
            ));
        }
        let title = proposal.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i64,
                title.len() as i64,
            )
            .into());
        }
        if proposal.deadline < today {
            return Err(ValidationError::out_of_range(
                "deadline",
                0,
                i64::MAX,
                (proposal.deadline - today).num_days(),
            )
            .into());
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            connection_id: *connection.id(),
            proposed_by,
            title,
            description: proposal.description.trim().to_string(),
            deadline: proposal.deadline,
            status: MilestoneStatus::Proposed,
            agreed_by: None,
            agreed_at: None,
            requires_document: proposal.requires_document,
            document_type: proposal.document_type.filter(|t| !t.trim().is_empty()),
            template_url: proposal.template_url.filter(|t| !t.trim().is_empty()),
            document: DocumentExchange::new(),
            created_at: now,
            updated_at: now,
            version: 1,
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: MilestoneId,
        connection_id: ConnectionId,
        proposed_by: UserId,
        title: String,
        description: String,
        deadline: NaiveDate,
        status: MilestoneStatus,
        agreed_by: Option<UserId>,
        agreed_at: Option<Timestamp>,
        requires_document: bool,
        document_type: Option<String>,
        template_url: Option<String>,
        document: DocumentExchange,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            connection_id,
            proposed_by,
            title,
            description,
            deadline,
            status,
            agreed_by,
            agreed_at,
            requires_document,
            document_type,
            template_url,
            document,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MilestoneId {
        &self.id
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn proposed_by(&self) -> &UserId {
        &self.proposed_by
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    pub fn status(&self) -> MilestoneStatus {
        self.status
    }

    pub fn agreed_by(&self) -> Option<&UserId> {
        self.agreed_by.as_ref()
    }

    pub fn agreed_at(&self) -> Option<&Timestamp> {
        self.agreed_at.as_ref()
    }

    pub fn requires_document(&self) -> bool {
        self.requires_document
    }

    pub fn document_type(&self) -> Option<&str> {
        self.document_type.as_deref()
    }

    pub fn template_url(&self) -> Option<&str> {
        self.template_url.as_deref()
    }

    pub fn document(&self) -> &DocumentExchange {
        &self.document
    }

    pub fn document_status(&self) -> ExchangeStatus {
        self.document.status()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Counter-party agreement: `proposed -> agreed`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` when already agreed or when `by` proposed it
    pub fn agree(&mut self, by: &UserId) -> Result<MilestoneStatus, DomainError> {
        if &self.proposed_by == by {
            return Err(DomainError::invalid_transition(
                "The proposer cannot agree to their own milestone",
            ));
        }
        let previous = self.status;
        self.status = previous.transition_to(MilestoneStatus::Agreed)?;
        self.agreed_by = Some(by.clone());
        self.agreed_at = Some(Timestamp::now());
        self.touch();
        Ok(previous)
    }

    /// Submits the milestone document, returning the previous document status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` when no document is required, when a
    ///   submission awaits review or when the document is already verified
    pub fn submit_document(
        &mut self,
        document_url: impl Into<String>,
        by: &UserId,
    ) -> Result<ExchangeStatus, DomainError> {
        if !self.requires_document {
            return Err(DomainError::invalid_transition(
                "Milestone does not require a document",
            ));
        }
        let previous = self.document.status();
        self.document.submit(document_url, by)?;
        self.touch();
        Ok(previous)
    }

    /// Verifies or rejects the submitted document.
    pub fn review_document(&mut self, approved: bool, by: &UserId) -> Result<ExchangeStatus, DomainError> {
        let previous = self.document.review(approved, by)?;
        self.touch();
        Ok(previous)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
        self.version += 1;
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::proposal;
    use super::*;
    use crate::domain::connection::{fixtures::connection, ConnectionStatus};
    use crate::domain::foundation::ErrorCode;
    use chrono::Duration;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn today() -> NaiveDate {
        Timestamp::now().date()
    }

    fn milestone(requires_document: bool) -> Milestone {
        let conn = connection("owner", "investor");
        Milestone::propose(
            MilestoneId::new(),
            &conn,
            user("investor"),
            proposal(requires_document),
            today(),
        )
        .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Proposal
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn propose_starts_at_proposed_with_no_document() {
        let m = milestone(true);
        assert_eq!(m.status(), MilestoneStatus::Proposed);
        assert_eq!(m.document_status(), ExchangeStatus::None);
        assert_eq!(m.document_type(), Some("audited_accounts"));
    }

    #[test]
    fn deadline_today_is_allowed_but_yesterday_is_not() {
        let conn = connection("owner", "investor");
        let mut p = proposal(false);
        p.deadline = today();
        assert!(Milestone::propose(MilestoneId::new(), &conn, user("owner"), p.clone(), today()).is_ok());

        p.deadline = today() - Duration::days(1);
        let err = Milestone::propose(MilestoneId::new(), &conn, user("owner"), p, today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(err.field(), Some("deadline"));
    }

    #[test]
    fn closed_connection_rejects_proposals() {
        let mut conn = connection("owner", "investor");
        for s in [
            ConnectionStatus::Connected,
            ConnectionStatus::Contract,
            ConnectionStatus::Closed,
        ] {
            conn.advance(s, &user("owner")).unwrap();
        }
        let err = Milestone::propose(MilestoneId::new(), &conn, user("owner"), proposal(false), today())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn blank_title_is_rejected() {
        let conn = connection("owner", "investor");
        let mut p = proposal(false);
        p.title = " ".to_string();
        let err = Milestone::propose(MilestoneId::new(), &conn, user("owner"), p, today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Agreement
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn proposer_cannot_agree() {
        let mut m = milestone(false);
        let err = m.agree(&user("investor")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(m.status(), MilestoneStatus::Proposed);
    }

    #[test]
    fn counterparty_agrees_once() {
        let mut m = milestone(false);
        m.agree(&user("owner")).unwrap();
        assert_eq!(m.status(), MilestoneStatus::Agreed);
        assert_eq!(m.agreed_by(), Some(&user("owner")));
        let version = m.version();

        assert!(m.agree(&user("owner")).is_err());
        assert_eq!(m.version(), version);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Document
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn submit_requires_document_flag() {
        let mut m = milestone(false);
        let err = m.submit_document("ref", &user("owner")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn review_requires_submission() {
        let mut m = milestone(true);
        assert!(m.review_document(true, &user("investor")).is_err());
        assert_eq!(m.document_status(), ExchangeStatus::None);
    }

    #[test]
    fn document_submit_and_verify() {
        let mut m = milestone(true);
        m.submit_document("s3://docs/a.pdf", &user("owner")).unwrap();
        assert_eq!(m.document_status(), ExchangeStatus::Submitted);
        m.review_document(true, &user("investor")).unwrap();
        assert_eq!(m.document_status(), ExchangeStatus::Verified);
        assert_eq!(m.document().document_url(), Some("s3://docs/a.pdf"));
    }
}

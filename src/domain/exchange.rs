//! Document exchange - the submitted/verified/rejected sub-state used by
//! milestones and connection-level document requests.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp, UserId, ValidationError};

/// Status of a document exchanged between connection participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStatus {
    #[default]
    None,
    Submitted,
    Verified,
    Rejected,
}

impl ExchangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeStatus::None => "none",
            ExchangeStatus::Submitted => "submitted",
            ExchangeStatus::Verified => "verified",
            ExchangeStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(ExchangeStatus::None),
            "submitted" => Some(ExchangeStatus::Submitted),
            "verified" => Some(ExchangeStatus::Verified),
            "rejected" => Some(ExchangeStatus::Rejected),
            _ => None,
        }
    }
}

impl StateMachine for ExchangeStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ExchangeStatus::*;
        matches!(
            (self, target),
            (None, Submitted) | (Rejected, Submitted) | (Submitted, Verified) | (Submitted, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ExchangeStatus::*;
        match self {
            None | Rejected => vec![Submitted],
            Submitted => vec![Verified, Rejected],
            Verified => vec![],
        }
    }
}

/// A superseded submission, kept after rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeAttempt {
    pub document_url: String,
    pub submitted_by: UserId,
    pub submitted_at: Timestamp,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
}

/// Current document reference plus the history of rejected attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DocumentExchange {
    status: ExchangeStatus,
    document_url: Option<String>,
    submitted_by: Option<UserId>,
    submitted_at: Option<Timestamp>,
    reviewed_by: Option<UserId>,
    reviewed_at: Option<Timestamp>,
    #[serde(default)]
    history: Vec<ExchangeAttempt>,
}

impl DocumentExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submission. Allowed from `none` or after a rejection; the
    /// rejected attempt moves into history.
    pub fn submit(&mut self, document_url: impl Into<String>, by: &UserId) -> Result<(), DomainError> {
        let document_url = document_url.into();
        if document_url.trim().is_empty() {
            return Err(ValidationError::empty_field("document_url").into());
        }
        self.status = self.status.transition_to(ExchangeStatus::Submitted)?;

        if let (Some(url), Some(submitter), Some(at)) =
            (self.document_url.take(), self.submitted_by.take(), self.submitted_at.take())
        {
            self.history.push(ExchangeAttempt {
                document_url: url,
                submitted_by: submitter,
                submitted_at: at,
                reviewed_by: self.reviewed_by.take(),
                reviewed_at: self.reviewed_at.take(),
            });
        }

        self.document_url = Some(document_url.trim().to_string());
        self.submitted_by = Some(by.clone());
        self.submitted_at = Some(Timestamp::now());
        self.reviewed_by = None;
        self.reviewed_at = None;
        Ok(())
    }

    /// Verifies or rejects the pending submission. The submitter cannot
    /// review their own document. The document reference is kept either way.
    pub fn review(&mut self, approved: bool, by: &UserId) -> Result<ExchangeStatus, DomainError> {
        if self.submitted_by.as_ref() == Some(by) {
            return Err(DomainError::new(
                ErrorCode::Unauthorized,
                "The submitter cannot review their own document",
            ));
        }
        let target = if approved {
            ExchangeStatus::Verified
        } else {
            ExchangeStatus::Rejected
        };
        let previous = self.status;
        self.status = self.status.transition_to(target)?;
        self.reviewed_by = Some(by.clone());
        self.reviewed_at = Some(Timestamp::now());
        Ok(previous)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        status: ExchangeStatus,
        document_url: Option<String>,
        submitted_by: Option<UserId>,
        submitted_at: Option<Timestamp>,
        reviewed_by: Option<UserId>,
        reviewed_at: Option<Timestamp>,
        history: Vec<ExchangeAttempt>,
    ) -> Self {
        Self {
            status,
            document_url,
            submitted_by,
            submitted_at,
            reviewed_by,
            reviewed_at,
            history,
        }
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    pub fn document_url(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    pub fn submitted_by(&self) -> Option<&UserId> {
        self.submitted_by.as_ref()
    }

    pub fn submitted_at(&self) -> Option<&Timestamp> {
        self.submitted_at.as_ref()
    }

    pub fn reviewed_by(&self) -> Option<&UserId> {
        self.reviewed_by.as_ref()
    }

    pub fn reviewed_at(&self) -> Option<&Timestamp> {
        self.reviewed_at.as_ref()
    }

    pub fn history(&self) -> &[ExchangeAttempt] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn review_from_none_is_invalid() {
        let mut exchange = DocumentExchange::new();
        let err = exchange.review(true, &user("reviewer")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(exchange.status(), ExchangeStatus::None);
    }

    #[test]
    fn submit_then_verify() {
        let mut exchange = DocumentExchange::new();
        exchange.submit("s3://docs/plan.pdf", &user("owner")).unwrap();
        assert_eq!(exchange.status(), ExchangeStatus::Submitted);

        let previous = exchange.review(true, &user("investor")).unwrap();
        assert_eq!(previous, ExchangeStatus::Submitted);
        assert_eq!(exchange.status(), ExchangeStatus::Verified);
        assert_eq!(exchange.reviewed_by(), Some(&user("investor")));
    }

    #[test]
    fn submitter_cannot_review() {
        let mut exchange = DocumentExchange::new();
        exchange.submit("ref", &user("owner")).unwrap();
        let err = exchange.review(true, &user("owner")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(exchange.status(), ExchangeStatus::Submitted);
    }

    #[test]
    fn rejection_keeps_reference_and_allows_resubmission() {
        let mut exchange = DocumentExchange::new();
        exchange.submit("first", &user("owner")).unwrap();
        exchange.review(false, &user("investor")).unwrap();
        assert_eq!(exchange.status(), ExchangeStatus::Rejected);
        assert_eq!(exchange.document_url(), Some("first"));

        exchange.submit("second", &user("owner")).unwrap();
        assert_eq!(exchange.document_url(), Some("second"));
        assert_eq!(exchange.history().len(), 1);
        assert_eq!(exchange.history()[0].document_url, "first");
        assert_eq!(exchange.history()[0].reviewed_by, Some(user("investor")));
    }

    #[test]
    fn cannot_submit_while_pending_or_verified() {
        let mut exchange = DocumentExchange::new();
        exchange.submit("first", &user("owner")).unwrap();
        assert!(exchange.submit("again", &user("owner")).is_err());

        exchange.review(true, &user("investor")).unwrap();
        assert!(exchange.submit("again", &user("owner")).is_err());
    }

    #[test]
    fn empty_url_is_rejected() {
        let mut exchange = DocumentExchange::new();
        let err = exchange.submit("  ", &user("owner")).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }
}

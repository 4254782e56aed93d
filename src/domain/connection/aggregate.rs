//! Connection aggregate - the staged relationship between one business and
//! one investor.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BusinessId, ConnectionId, DomainError, StateMachine, Timestamp, UserId, ValidationError,
};

/// Relationship stage. Strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Lead,
    Connected,
    Contract,
    Closed,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Lead => "lead",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Contract => "contract",
            ConnectionStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lead" => Some(ConnectionStatus::Lead),
            "connected" => Some(ConnectionStatus::Connected),
            "contract" => Some(ConnectionStatus::Contract),
            "closed" => Some(ConnectionStatus::Closed),
            _ => None,
        }
    }

    /// The only stage reachable from this one.
    pub fn next(&self) -> Option<Self> {
        match self {
            ConnectionStatus::Lead => Some(ConnectionStatus::Connected),
            ConnectionStatus::Connected => Some(ConnectionStatus::Contract),
            ConnectionStatus::Contract => Some(ConnectionStatus::Closed),
            ConnectionStatus::Closed => None,
        }
    }
}

impl StateMachine for ConnectionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}

/// One entry in a connection's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: Option<ConnectionStatus>,
    pub to: ConnectionStatus,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

/// Connection aggregate.
///
/// # Invariants
///
/// - One connection per `(business_id, investor_id)` pair
/// - Status only advances `lead -> connected -> contract -> closed`
/// - `status_history` starts with the creation entry and is append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    id: ConnectionId,
    business_id: BusinessId,
    business_owner_id: UserId,
    investor_id: UserId,
    status: ConnectionStatus,
    status_history: Vec<StatusChange>,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl Connection {
    /// Creates a connection at `lead`, initiated by the investor.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` when the investor owns the business
    pub fn initiate(
        id: ConnectionId,
        business_id: BusinessId,
        business_owner_id: UserId,
        investor_id: UserId,
    ) -> Result<Self, DomainError> {
        if business_owner_id == investor_id {
            return Err(ValidationError::invalid_format(
                "investor_id",
                "cannot connect with your own business",
            )
            .into());
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            business_id,
            business_owner_id,
            status: ConnectionStatus::Lead,
            status_history: vec![StatusChange {
                from: None,
                to: ConnectionStatus::Lead,
                changed_by: investor_id.clone(),
                changed_at: now,
            }],
            investor_id,
            created_at: now,
            updated_at: now,
            version: 1,
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ConnectionId,
        business_id: BusinessId,
        business_owner_id: UserId,
        investor_id: UserId,
        status: ConnectionStatus,
        status_history: Vec<StatusChange>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            business_id,
            business_owner_id,
            investor_id,
            status,
            status_history,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn business_id(&self) -> &BusinessId {
        &self.business_id
    }

    pub fn business_owner_id(&self) -> &UserId {
        &self.business_owner_id
    }

    pub fn investor_id(&self) -> &UserId {
        &self.investor_id
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn status_history(&self) -> &[StatusChange] {
        &self.status_history
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

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        &self.investor_id == user_id || &self.business_owner_id == user_id
    }

    /// The other side of the relationship, if `user_id` is a participant.
    pub fn counterparty_of(&self, user_id: &UserId) -> Option<&UserId> {
        if &self.investor_id == user_id {
            Some(&self.business_owner_id)
        } else if &self.business_owner_id == user_id {
            Some(&self.investor_id)
        } else {
            None
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == ConnectionStatus::Closed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves to `target`, which must be the next stage. Returns the previous
    /// status. On failure the connection is unchanged.
    pub fn advance(
        &mut self,
        target: ConnectionStatus,
        by: &UserId,
    ) -> Result<ConnectionStatus, DomainError> {
        let previous = self.status;
        self.status = previous.transition_to(target)?;
        let now = Timestamp::now();
        self.status_history.push(StatusChange {
            from: Some(previous),
            to: target,
            changed_by: by.clone(),
            changed_at: now,
        });
        self.updated_at = now;
        self.version += 1;
        Ok(previous)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn connection(owner: &str, investor: &str) -> Connection {
        Connection::initiate(
            ConnectionId::new(),
            BusinessId::new(),
            UserId::new(owner).unwrap(),
            UserId::new(investor).unwrap(),
        )
        .unwrap()
    }
}

//! Pure authorization predicates.
//!
//! These functions decide; they never record. The application layer's
//! `AuthorizationGuard` turns a `Denial` into an audit entry and an error.
//!
//! ```text
//! foundation/authorization.rs  <- Principal, predicates (this module)
//! application/authorization.rs <- AuthorizationGuard (loads users, audits)
//! ```

use serde_json::json;

use super::{DomainError, ErrorCode, Role, UserId};

/// Resolved caller: an active user with a role and optional jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub jurisdiction: Option<String>,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role, jurisdiction: Option<String>) -> Self {
        Self {
            user_id,
            role,
            jurisdiction,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// Which rule rejected the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    Role,
    Jurisdiction,
    Participant,
}

/// A failed check with the context needed to audit it.
#[derive(Debug, Clone, PartialEq)]
pub struct Denial {
    pub kind: DenialKind,
    pub reason: String,
    pub metadata: serde_json::Value,
}

/// Outcome of an authorization predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    Granted,
    Denied(Denial),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }

    /// Converts into a `Result`, yielding the denial on failure.
    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied(denial) => Err(denial),
        }
    }
}

/// Failure raised by the authorization guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No user for the subject, or the user is suspended.
    Unauthenticated,
    /// A predicate denied access. The denial has already been handled.
    Unauthorized(String),
    /// The user store or audit log failed.
    Infrastructure(String),
}

impl AccessError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AccessError::Unauthenticated => ErrorCode::Unauthenticated,
            AccessError::Unauthorized(_) => ErrorCode::Unauthorized,
            AccessError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AccessError::Unauthenticated => "Authentication required".to_string(),
            AccessError::Unauthorized(reason) => reason.clone(),
            AccessError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccessError {}

impl From<DomainError> for AccessError {
    fn from(err: DomainError) -> Self {
        AccessError::Infrastructure(err.to_string())
    }
}

/// Caller's role must be one of `roles`.
pub fn check_role(principal: &Principal, roles: &[Role]) -> AccessDecision {
    if principal.has_role(roles) {
        return AccessDecision::Granted;
    }
    let attempted: Vec<&str> = roles.iter().map(Role::as_str).collect();
    AccessDecision::Denied(Denial {
        kind: DenialKind::Role,
        reason: format!(
            "Role '{}' is not permitted; requires one of [{}]",
            principal.role,
            attempted.join(", ")
        ),
        metadata: json!({
            "attemptedRoles": attempted,
            "actualRole": principal.role.as_str(),
        }),
    })
}

/// Regulators may only act inside their own jurisdiction.
///
/// Admins bypass; other roles are not jurisdiction-scoped.
pub fn check_jurisdiction(principal: &Principal, scope: &str) -> AccessDecision {
    if principal.is_admin() || principal.role != Role::Regulator {
        return AccessDecision::Granted;
    }
    match principal.jurisdiction.as_deref() {
        Some(own) if own.trim().eq_ignore_ascii_case(scope.trim()) => AccessDecision::Granted,
        own => AccessDecision::Denied(Denial {
            kind: DenialKind::Jurisdiction,
            reason: format!("Jurisdiction '{}' is outside the caller's scope", scope),
            metadata: json!({
                "requestedJurisdiction": scope,
                "actualJurisdiction": own,
            }),
        }),
    }
}

/// Returns true when the regulator's jurisdiction covers any of `scopes`.
pub fn jurisdiction_covers(principal: &Principal, scopes: &[&str]) -> bool {
    scopes
        .iter()
        .any(|scope| check_jurisdiction(principal, scope).is_granted())
}

/// Caller must be one of the two parties of a connection.
pub fn check_participant(
    principal: &Principal,
    investor_id: &UserId,
    business_owner_id: &UserId,
) -> AccessDecision {
    if &principal.user_id == investor_id || &principal.user_id == business_owner_id {
        return AccessDecision::Granted;
    }
    AccessDecision::Denied(Denial {
        kind: DenialKind::Participant,
        reason: "Caller is not a participant of this connection".to_string(),
        metadata: json!({ "actualRole": principal.role.as_str() }),
    })
}

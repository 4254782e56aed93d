//! User aggregate.
//!
//! Users are created on first login and never hard-deleted; suspension
//! revokes access instead.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AuthenticatedUser, DomainError, Principal, Role, StateMachine, Timestamp, UserId,
};

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(UserStatus::Active),
            "suspended" => Some(UserStatus::Suspended),
            _ => None,
        }
    }
}

impl StateMachine for UserStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self != target
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            UserStatus::Active => vec![UserStatus::Suspended],
            UserStatus::Suspended => vec![UserStatus::Active],
        }
    }
}

/// A platform user, keyed by identity provider subject.
///
/// # Invariants
///
/// - `jurisdiction` is set if and only if `role` is `Regulator`
/// - `version` increases by one on every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Option<String>,
    display_name: Option<String>,
    role: Role,
    status: UserStatus,
    jurisdiction: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl User {
    /// First-login provisioning: role `user`, status `active`.
    pub fn provision(identity: &AuthenticatedUser) -> Self {
        Self::provision_with_role(identity, Role::User)
    }

    /// First-login provisioning of a configured bootstrap administrator.
    pub fn provision_admin(identity: &AuthenticatedUser) -> Self {
        Self::provision_with_role(identity, Role::Admin)
    }

    fn provision_with_role(identity: &AuthenticatedUser, role: Role) -> Self {
        let now = Timestamp::now();
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            role,
            status: UserStatus::Active,
            jurisdiction: None,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    /// Reconstitute a user from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: Option<String>,
        display_name: Option<String>,
        role: Role,
        status: UserStatus,
        jurisdiction: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            role,
            status,
            jurisdiction,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn jurisdiction(&self) -> Option<&str> {
        self.jurisdiction.as_deref()
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

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Authorization view of this user.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id.clone(), self.role, self.jurisdiction.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Assigns a new role, returning the previous one.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a regulator has no jurisdiction
    pub fn change_role(
        &mut self,
        role: Role,
        jurisdiction: Option<String>,
    ) -> Result<Role, DomainError> {
        let jurisdiction = match role {
            Role::Regulator => {
                let value = jurisdiction
                    .map(|j| j.trim().to_string())
                    .filter(|j| !j.is_empty())
                    .ok_or_else(|| {
                        DomainError::validation(
                            "jurisdiction",
                            "Regulators must be assigned a jurisdiction",
                        )
                    })?;
                Some(value)
            }
            _ => None,
        };

        let previous = self.role;
        self.role = role;
        self.jurisdiction = jurisdiction;
        self.touch();
        Ok(previous)
    }

    /// Suspends or reactivates the account, returning the previous status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the user already has that status
    pub fn change_status(&mut self, status: UserStatus) -> Result<UserStatus, DomainError> {
        let previous = self.status;
        self.status = previous.transition_to(status)?;
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
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn identity() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("sub-1").unwrap(),
            Some("ada@example.com".to_string()),
            Some("Ada".to_string()),
        )
    }

    #[test]
    fn provision_defaults_to_active_user_role() {
        let user = User::provision(&identity());
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.status(), UserStatus::Active);
        assert_eq!(user.version(), 1);
        assert_eq!(user.email(), Some("ada@example.com"));
    }

    #[test]
    fn change_role_returns_previous_and_bumps_version() {
        let mut user = User::provision(&identity());
        let previous = user.change_role(Role::Investor, None).unwrap();
        assert_eq!(previous, Role::User);
        assert_eq!(user.role(), Role::Investor);
        assert_eq!(user.version(), 2);
    }

    #[test]
    fn regulator_requires_jurisdiction() {
        let mut user = User::provision(&identity());
        let err = user.change_role(Role::Regulator, Some("  ".to_string())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(user.role(), Role::User);
    }

    #[test]
    fn leaving_regulator_clears_jurisdiction() {
        let mut user = User::provision(&identity());
        user.change_role(Role::Regulator, Some("Lagos".to_string())).unwrap();
        assert_eq!(user.jurisdiction(), Some("Lagos"));

        user.change_role(Role::Investor, Some("Lagos".to_string())).unwrap();
        assert_eq!(user.jurisdiction(), None);
    }

    #[test]
    fn suspending_twice_fails() {
        let mut user = User::provision(&identity());
        user.change_status(UserStatus::Suspended).unwrap();
        assert!(!user.is_active());

        let err = user.change_status(UserStatus::Suspended).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn principal_carries_role_and_jurisdiction() {
        let mut user = User::provision(&identity());
        user.change_role(Role::Regulator, Some("Lagos".to_string())).unwrap();
        let principal = user.principal();
        assert_eq!(principal.role, Role::Regulator);
        assert_eq!(principal.jurisdiction.as_deref(), Some("Lagos"));
    }
}

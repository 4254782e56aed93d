//! Canonical platform roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The single role enumeration used by every authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SystemAdmin,
    Regulator,
    BusinessOwner,
    VerificationOfficer,
    DataAnalyst,
    Investor,
    User,
}

/// Presentation hints for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDisplay {
    pub label: &'static str,
    pub description: &'static str,
    pub badge: &'static str,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Admin,
        Role::SystemAdmin,
        Role::Regulator,
        Role::BusinessOwner,
        Role::VerificationOfficer,
        Role::DataAnalyst,
        Role::Investor,
        Role::User,
    ];

    /// Roles that bypass jurisdiction scoping.
    pub const ADMINS: [Role; 2] = [Role::Admin, Role::SystemAdmin];

    /// Roles allowed to review verification documents.
    pub const VERIFIERS: [Role; 3] = [Role::VerificationOfficer, Role::Admin, Role::SystemAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SystemAdmin => "system_admin",
            Role::Regulator => "regulator",
            Role::BusinessOwner => "business_owner",
            Role::VerificationOfficer => "verification_officer",
            Role::DataAnalyst => "data_analyst",
            Role::Investor => "investor",
            Role::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        Self::ADMINS.contains(self)
    }

    /// Label/description/badge for UI composition.
    pub fn display_config(&self) -> RoleDisplay {
        match self {
            Role::Admin => RoleDisplay {
                label: "Administrator",
                description: "Manages users and platform settings",
                badge: "red",
            },
            Role::SystemAdmin => RoleDisplay {
                label: "System Administrator",
                description: "Full platform access including audit verification",
                badge: "purple",
            },
            Role::Regulator => RoleDisplay {
                label: "Regulator",
                description: "Oversees businesses inside an assigned jurisdiction",
                badge: "orange",
            },
            Role::BusinessOwner => RoleDisplay {
                label: "Business Owner",
                description: "Publishes a business profile and engages investors",
                badge: "blue",
            },
            Role::VerificationOfficer => RoleDisplay {
                label: "Verification Officer",
                description: "Reviews business verification documents",
                badge: "teal",
            },
            Role::DataAnalyst => RoleDisplay {
                label: "Data Analyst",
                description: "Read-only access to audit and platform data",
                badge: "gray",
            },
            Role::Investor => RoleDisplay {
                label: "Investor",
                description: "Discovers matched businesses and opens connections",
                badge: "green",
            },
            Role::User => RoleDisplay {
                label: "Member",
                description: "Signed in without an assigned role",
                badge: "slate",
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("role", format!("unknown role '{}'", s)))
    }
}

//! HTTP DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, RoleDisplay, Timestamp};
use crate::domain::user::{User, UserStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
    /// Required when assigning `regulator`.
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: UserStatus,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A user as seen by clients, with presentation hints for the role.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub role: Role,
    pub role_display: RoleDisplay,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().map(str::to_string),
            display_name: user.display_name().map(str::to_string),
            role: user.role(),
            role_display: user.role().display_config(),
            status: user.status(),
            jurisdiction: user.jurisdiction().map(str::to_string),
            created_at: *user.created_at(),
            updated_at: *user.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionUserResponse {
    pub user: UserResponse,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleChangeResponse {
    pub user: UserResponse,
    pub previous_role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusChangeResponse {
    pub user: UserResponse,
    pub previous_status: UserStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AuthenticatedUser, UserId};

    #[test]
    fn user_response_includes_role_display() {
        let identity = AuthenticatedUser::new(
            UserId::new("sub-1").unwrap(),
            Some("ada@example.com".to_string()),
            None,
        );
        let user = User::provision(&identity);

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["id"], "sub-1");
        assert_eq!(json["role"], "user");
        assert!(json["role_display"]["label"].is_string());
        assert!(json.get("jurisdiction").is_none());
    }

    #[test]
    fn update_role_request_accepts_missing_jurisdiction() {
        let req: UpdateRoleRequest = serde_json::from_str(r#"{"role":"investor"}"#).unwrap();
        assert_eq!(req.role, Role::Investor);
        assert!(req.jurisdiction.is_none());
    }
}

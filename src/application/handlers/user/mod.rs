//! User command and query handlers.

mod get_current_user;
mod provision_user;
mod update_user_role;
mod update_user_status;

pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserQuery};
pub use provision_user::{ProvisionUserCommand, ProvisionUserHandler, ProvisionUserResult};
pub use update_user_role::{UpdateUserRoleCommand, UpdateUserRoleHandler, UpdateUserRoleResult};
pub use update_user_status::{
    UpdateUserStatusCommand, UpdateUserStatusHandler, UpdateUserStatusResult,
};

//! HTTP adapter for user provisioning and admin user management.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ProvisionUserResponse, RoleChangeResponse, StatusChangeResponse, UpdateRoleRequest,
    UpdateStatusRequest, UserResponse,
};
pub use routes::user_routes;

//! HTTP adapter for business profiles and verification documents.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BusinessResponse, DocumentResponse, RejectDocumentRequest, SaveBusinessResponse,
    UpdateVerificationRequest, UploadDocumentRequest,
};
pub use routes::business_routes;

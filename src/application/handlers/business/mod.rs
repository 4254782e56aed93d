//! Business profile and verification handlers.

mod get_business_documents;
mod get_pending_businesses;
mod review_verification_document;
mod save_business_profile;
mod submit_for_verification;
mod update_business_verification;
mod upload_verification_document;

use crate::domain::foundation::Role;

/// Roles that review businesses. Regulators are further limited to their
/// jurisdiction.
pub const REVIEWERS: [Role; 4] = [
    Role::VerificationOfficer,
    Role::Admin,
    Role::SystemAdmin,
    Role::Regulator,
];

pub use get_business_documents::{GetBusinessDocumentsHandler, GetBusinessDocumentsQuery};
pub use get_pending_businesses::{GetPendingBusinessesHandler, GetPendingBusinessesQuery};
pub use review_verification_document::{
    DocumentDecision, ReviewVerificationDocumentCommand, ReviewVerificationDocumentHandler,
};
pub use save_business_profile::{
    SaveBusinessProfileCommand, SaveBusinessProfileHandler, SaveBusinessProfileResult,
};
pub use submit_for_verification::SubmitForVerificationHandler;
pub use update_business_verification::{
    UpdateBusinessVerificationCommand, UpdateBusinessVerificationHandler,
};
pub use upload_verification_document::{
    UploadVerificationDocumentCommand, UploadVerificationDocumentHandler,
};

//! Business module - profiles owned by business owners and their
//! verification documents.

mod document;
mod errors;
mod profile;

pub use document::{DocumentCategory, DocumentStatus, VerificationDocument};
pub use errors::BusinessError;
pub use profile::{
    BusinessProfile, BusinessProfileDraft, BusinessStage, Location, VerificationStatus,
    MAX_CREDIBILITY,
};

#[cfg(test)]
pub(crate) use profile::fixtures;

use crate::domain::foundation::DomainError;
use crate::domain::matching::{ReferenceData, DEFAULT_REFERENCE_DATA};
use crate::ports::ReferenceDataSource;

/// Serves the compiled-in default tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinReferenceSource;

impl ReferenceDataSource for BuiltinReferenceSource {
    fn load(&self) -> Result<ReferenceData, DomainError> {
        Ok(DEFAULT_REFERENCE_DATA.clone())
    }
}

//! Reference data port. Sector and region tables are read-only inputs.

use crate::domain::foundation::DomainError;
use crate::domain::matching::ReferenceData;

/// Loads the sector taxonomy and region lookup tables.
pub trait ReferenceDataSource: Send + Sync {
    fn load(&self) -> Result<ReferenceData, DomainError>;
}

//! YAML file reference data source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matching::{ReferenceData, ReferenceTables};
use crate::ports::ReferenceDataSource;

/// Reads sector families and region mappings from a YAML file.
#[derive(Debug, Clone)]
pub struct YamlFileReferenceSource {
    path: PathBuf,
}

impl YamlFileReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferenceDataSource for YamlFileReferenceSource {
    fn load(&self) -> Result<ReferenceData, DomainError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to read reference data {}: {}", self.path.display(), e),
            )
        })?;

        let tables: ReferenceTables = serde_yaml::from_str(&raw).map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid reference data {}: {}", self.path.display(), e),
            )
        })?;

        let data = ReferenceData::from_tables(tables);
        tracing::debug!(
            path = %self.path.display(),
            sectors = data.sector_count(),
            regions = data.region_count(),
            "loaded reference data"
        );
        Ok(data)
    }
}

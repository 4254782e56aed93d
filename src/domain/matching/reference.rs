//! Sector taxonomy and region lookup tables.
//!
//! Authoring this data is out of scope; the engine only reads it. Lookups
//! are case-insensitive.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Raw tables as they appear in a reference data file.
///
/// ```yaml
/// sector_families:
///   financial_services: [Fintech, Insurtech, Banking]
/// regions:
///   Lagos: Nigeria
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTables {
    #[serde(default)]
    pub sector_families: HashMap<String, Vec<String>>,
    /// State or city name to country name.
    #[serde(default)]
    pub regions: HashMap<String, String>,
}

/// Indexed reference data.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    family_by_sector: HashMap<String, String>,
    country_by_region: HashMap<String, String>,
}

impl ReferenceData {
    pub fn from_tables(tables: ReferenceTables) -> Self {
        let mut family_by_sector = HashMap::new();
        for (family, sectors) in tables.sector_families {
            for sector in sectors {
                family_by_sector.insert(key(&sector), family.clone());
            }
        }
        let country_by_region = tables
            .regions
            .into_iter()
            .map(|(region, country)| (key(&region), country))
            .collect();
        Self {
            family_by_sector,
            country_by_region,
        }
    }

    /// Sector family, if the sector is in the taxonomy.
    pub fn family_of(&self, sector: &str) -> Option<&str> {
        self.family_by_sector.get(&key(sector)).map(String::as_str)
    }

    /// Country containing a state or city.
    pub fn country_of(&self, region: &str) -> Option<&str> {
        self.country_by_region.get(&key(region)).map(String::as_str)
    }

    pub fn same_family(&self, a: &str, b: &str) -> bool {
        match (self.family_of(a), self.family_of(b)) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => false,
        }
    }

    pub fn sector_count(&self) -> usize {
        self.family_by_sector.len()
    }

    pub fn region_count(&self) -> usize {
        self.country_by_region.len()
    }
}

fn key(value: &str) -> String {
    value.trim().to_lowercase()
}

fn families(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(family, sectors)| {
            (
                family.to_string(),
                sectors.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

/// Built-in tables used when no reference data file is configured.
pub static DEFAULT_REFERENCE_DATA: Lazy<ReferenceData> = Lazy::new(|| {
    let sector_families = families(&[
        (
            "financial_services",
            &["Fintech", "Insurtech", "Banking", "Payments", "Microfinance"],
        ),
        (
            "agriculture",
            &["Agritech", "Agriculture", "Agro-processing", "Food Processing"],
        ),
        ("health", &["Healthtech", "Healthcare", "Pharmaceuticals", "Biotech"]),
        ("education", &["Edtech", "Education"]),
        ("energy", &["Cleantech", "Renewable Energy", "Energy", "Oil and Gas"]),
        ("commerce", &["E-commerce", "Retail", "Logistics", "Marketplace"]),
        ("technology", &["Software", "SaaS", "Telecommunications", "Hardware"]),
        ("real_estate", &["Proptech", "Real Estate", "Construction"]),
        ("manufacturing", &["Manufacturing", "Textiles", "Automotive"]),
    ]);

    let regions: HashMap<String, String> = [
        ("Lagos", "Nigeria"),
        ("Abuja", "Nigeria"),
        ("FCT", "Nigeria"),
        ("Kano", "Nigeria"),
        ("Rivers", "Nigeria"),
        ("Port Harcourt", "Nigeria"),
        ("Oyo", "Nigeria"),
        ("Ibadan", "Nigeria"),
        ("Kaduna", "Nigeria"),
        ("Enugu", "Nigeria"),
        ("Nairobi", "Kenya"),
        ("Mombasa", "Kenya"),
        ("Greater Accra", "Ghana"),
        ("Accra", "Ghana"),
        ("Ashanti", "Ghana"),
        ("Kumasi", "Ghana"),
        ("Gauteng", "South Africa"),
        ("Johannesburg", "South Africa"),
        ("Western Cape", "South Africa"),
        ("Cape Town", "South Africa"),
        ("Cairo", "Egypt"),
        ("Kigali", "Rwanda"),
    ]
    .iter()
    .map(|(r, c)| (r.to_string(), c.to_string()))
    .collect();

    ReferenceData::from_tables(ReferenceTables {
        sector_families,
        regions,
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_know_fintech_family() {
        assert_eq!(DEFAULT_REFERENCE_DATA.family_of("fintech"), Some("financial_services"));
        assert!(DEFAULT_REFERENCE_DATA.same_family("Fintech", "Insurtech"));
        assert!(!DEFAULT_REFERENCE_DATA.same_family("Fintech", "Agritech"));
    }

    #[test]
    fn region_lookup_is_case_insensitive() {
        assert_eq!(DEFAULT_REFERENCE_DATA.country_of(" lagos "), Some("Nigeria"));
        assert_eq!(DEFAULT_REFERENCE_DATA.country_of("Atlantis"), None);
    }

    #[test]
    fn unknown_sectors_are_never_same_family() {
        assert!(!DEFAULT_REFERENCE_DATA.same_family("Unknown", "Unknown"));
    }

    #[test]
    fn from_tables_indexes_every_sector() {
        let data = ReferenceData::from_tables(ReferenceTables {
            sector_families: families(&[("a", &["X", "Y"]), ("b", &["Z"])]),
            regions: HashMap::new(),
        });
        assert_eq!(data.sector_count(), 3);
        assert_eq!(data.region_count(), 0);
    }
}

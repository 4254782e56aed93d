//! Investor preferences - the read-only input of the matching engine.

use serde::{Deserialize, Serialize};

use crate::domain::business::BusinessStage;
use crate::domain::foundation::{DomainError, Timestamp, UserId, ValidationError};

/// How much risk an investor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAppetite {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskAppetite {
    pub fn ordinal(&self) -> i32 {
        match self {
            RiskAppetite::Conservative => 0,
            RiskAppetite::Moderate => 1,
            RiskAppetite::Aggressive => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAppetite::Conservative => "conservative",
            RiskAppetite::Moderate => "moderate",
            RiskAppetite::Aggressive => "aggressive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "conservative" => Some(RiskAppetite::Conservative),
            "moderate" => Some(RiskAppetite::Moderate),
            "aggressive" => Some(RiskAppetite::Aggressive),
            _ => None,
        }
    }

    /// Risk tier implied by a business stage.
    pub fn implied_by(stage: BusinessStage) -> Self {
        match stage {
            BusinessStage::Idea | BusinessStage::Early => RiskAppetite::Aggressive,
            BusinessStage::Growth => RiskAppetite::Moderate,
            BusinessStage::Established => RiskAppetite::Conservative,
        }
    }
}

/// Inclusive ticket size range in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalRange {
    pub min: u64,
    pub max: u64,
}

impl CapitalRange {
    pub fn new(min: u64, max: u64) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::invalid_format(
                "capital_range",
                format!("min {} exceeds max {}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, amount: u64) -> bool {
        self.min <= amount && amount <= self.max
    }
}

/// Owner-editable preference fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesInput {
    #[serde(default)]
    pub target_sectors: Vec<String>,
    #[serde(default)]
    pub target_regions: Vec<String>,
    pub capital_min: u64,
    pub capital_max: u64,
    pub risk_appetite: RiskAppetite,
    #[serde(default)]
    pub preferred_stages: Vec<BusinessStage>,
}

/// Investment preferences of one investor.
///
/// Sector and region sets are stored trimmed and de-duplicated
/// case-insensitively. Empty sets mean "no preference".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorPreferences {
    investor_id: UserId,
    target_sectors: Vec<String>,
    target_regions: Vec<String>,
    capital_range: CapitalRange,
    risk_appetite: RiskAppetite,
    preferred_stages: Vec<BusinessStage>,
    updated_at: Timestamp,
    version: u64,
}

impl InvestorPreferences {
    pub fn new(investor_id: UserId, input: PreferencesInput) -> Result<Self, DomainError> {
        let capital_range = CapitalRange::new(input.capital_min, input.capital_max)?;
        let mut stages = input.preferred_stages;
        stages.sort();
        stages.dedup();
        Ok(Self {
            investor_id,
            target_sectors: normalize_set(input.target_sectors),
            target_regions: normalize_set(input.target_regions),
            capital_range,
            risk_appetite: input.risk_appetite,
            preferred_stages: stages,
            updated_at: Timestamp::now(),
            version: 1,
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        investor_id: UserId,
        target_sectors: Vec<String>,
        target_regions: Vec<String>,
        capital_range: CapitalRange,
        risk_appetite: RiskAppetite,
        preferred_stages: Vec<BusinessStage>,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            investor_id,
            target_sectors,
            target_regions,
            capital_range,
            risk_appetite,
            preferred_stages,
            updated_at,
            version,
        }
    }

    /// Replaces all fields, keeping identity and bumping the version.
    pub fn replace(&mut self, input: PreferencesInput) -> Result<(), DomainError> {
        let version = self.version + 1;
        *self = Self::new(self.investor_id.clone(), input)?;
        self.version = version;
        Ok(())
    }

    pub fn investor_id(&self) -> &UserId {
        &self.investor_id
    }

    pub fn target_sectors(&self) -> &[String] {
        &self.target_sectors
    }

    pub fn target_regions(&self) -> &[String] {
        &self.target_regions
    }

    pub fn capital_range(&self) -> CapitalRange {
        self.capital_range
    }

    pub fn risk_appetite(&self) -> RiskAppetite {
        self.risk_appetite
    }

    pub fn preferred_stages(&self) -> &[BusinessStage] {
        &self.preferred_stages
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

fn normalize_set(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.trim().to_string();
        if value.is_empty() {
            continue;
        }
        if !out.iter().any(|v| v.eq_ignore_ascii_case(&value)) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn input(sectors: &[&str], regions: &[&str], min: u64, max: u64) -> PreferencesInput {
        PreferencesInput {
            target_sectors: sectors.iter().map(|s| s.to_string()).collect(),
            target_regions: regions.iter().map(|s| s.to_string()).collect(),
            capital_min: min,
            capital_max: max,
            risk_appetite: RiskAppetite::Aggressive,
            preferred_stages: vec![BusinessStage::Early],
        }
    }

    pub fn preferences(sectors: &[&str], regions: &[&str], min: u64, max: u64) -> InvestorPreferences {
        InvestorPreferences::new(UserId::new("investor").unwrap(), input(sectors, regions, min, max))
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn capital_range_rejects_inverted_bounds() {
        assert!(CapitalRange::new(50, 10).is_err());
        assert!(CapitalRange::new(10, 10).unwrap().contains(10));
    }

    #[test]
    fn sets_are_trimmed_and_deduplicated() {
        let prefs = preferences(&["Fintech", " fintech ", "", "Agritech"], &["Lagos"], 0, 10);
        assert_eq!(prefs.target_sectors(), &["Fintech".to_string(), "Agritech".to_string()]);
    }

    #[test]
    fn replace_bumps_version() {
        let mut prefs = preferences(&["Fintech"], &[], 0, 10);
        prefs.replace(input(&["Health"], &[], 5, 20)).unwrap();
        assert_eq!(prefs.version(), 2);
        assert_eq!(prefs.capital_range(), CapitalRange { min: 5, max: 20 });
    }

    #[test]
    fn replace_with_invalid_range_keeps_old_values() {
        let mut prefs = preferences(&["Fintech"], &[], 0, 10);
        assert!(prefs.replace(input(&["Health"], &[], 30, 20)).is_err());
        assert_eq!(prefs.target_sectors(), &["Fintech".to_string()]);
        assert_eq!(prefs.version(), 1);
    }

    #[test]
    fn risk_is_implied_by_stage() {
        assert_eq!(RiskAppetite::implied_by(BusinessStage::Idea), RiskAppetite::Aggressive);
        assert_eq!(
            RiskAppetite::implied_by(BusinessStage::Established),
            RiskAppetite::Conservative
        );
    }
}

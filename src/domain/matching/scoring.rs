//! Preference-weighted compatibility scoring.
//!
//! Scores are integer points so results are reproducible across runs and
//! platforms. Every factor is capped independently and the caps sum to 100.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ReferenceData;
use crate::domain::business::{BusinessProfile, BusinessStage, VerificationStatus};
use crate::domain::foundation::BusinessId;
use crate::domain::investor::{CapitalRange, InvestorPreferences, RiskAppetite};

pub const SECTOR_WEIGHT: u8 = 35;
pub const LOCATION_WEIGHT: u8 = 25;
pub const CAPITAL_WEIGHT: u8 = 20;
pub const RISK_WEIGHT: u8 = 10;
pub const STAGE_WEIGHT: u8 = 10;

const SECTOR_SECONDARY: u8 = 20;
const SECTOR_FAMILY: u8 = 10;
const SECTOR_NO_PREFERENCE: u8 = 17;
const LOCATION_COUNTRY: u8 = 12;
const LOCATION_NO_PREFERENCE: u8 = 12;
const ADJACENT: u8 = 5;

/// Points awarded per factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sector: u8,
    pub location: u8,
    pub capital: u8,
    pub risk: u8,
    pub stage: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.sector + self.location + self.capital + self.risk + self.stage
    }
}

/// Score of one business for one investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub total: u8,
    pub breakdown: ScoreBreakdown,
}

/// A business in a ranked result list.
#[derive(Debug, Clone, Copy)]
pub struct RankedMatch<'a> {
    pub business: &'a BusinessProfile,
    pub score: MatchScore,
}

/// Scores one business against one investor's preferences.
pub fn score(
    preferences: &InvestorPreferences,
    business: &BusinessProfile,
    reference: &ReferenceData,
) -> MatchScore {
    let breakdown = ScoreBreakdown {
        sector: sector_points(preferences.target_sectors(), business, reference),
        location: location_points(preferences.target_regions(), business, reference),
        capital: capital_points(preferences.capital_range(), business.funding_ask()),
        risk: risk_points(preferences.risk_appetite(), business.stage()),
        stage: stage_points(preferences.preferred_stages(), business.stage()),
    };
    MatchScore {
        total: breakdown.total(),
        breakdown,
    }
}

/// Scores and ranks a catalog.
///
/// Dismissed and rejected businesses are skipped, and only totals strictly
/// above `min_score` are kept. Ordering is total descending, then
/// credibility descending, then business id ascending.
pub fn rank<'a>(
    preferences: &InvestorPreferences,
    catalog: &'a [BusinessProfile],
    dismissed: &HashSet<BusinessId>,
    reference: &ReferenceData,
    min_score: u8,
) -> Vec<RankedMatch<'a>> {
    let mut ranked: Vec<RankedMatch<'a>> = catalog
        .iter()
        .filter(|b| !dismissed.contains(b.id()))
        .filter(|b| b.verification_status() != VerificationStatus::Rejected)
        .map(|business| RankedMatch {
            business,
            score: score(preferences, business, reference),
        })
        .filter(|m| m.score.total > min_score)
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total
            .cmp(&a.score.total)
            .then_with(|| b.business.credibility_score().cmp(&a.business.credibility_score()))
            .then_with(|| a.business.id().cmp(b.business.id()))
    });
    ranked
}

fn contains_ignore_case(set: &[String], value: &str) -> bool {
    let value = value.trim();
    set.iter().any(|v| v.eq_ignore_ascii_case(value))
}

fn sector_points(targets: &[String], business: &BusinessProfile, reference: &ReferenceData) -> u8 {
    if targets.is_empty() {
        return SECTOR_NO_PREFERENCE;
    }
    if contains_ignore_case(targets, business.sector()) {
        return SECTOR_WEIGHT;
    }
    let secondary_hit = business
        .subsector()
        .into_iter()
        .chain(business.secondary_sectors().iter().map(String::as_str))
        .any(|s| contains_ignore_case(targets, s));
    if secondary_hit {
        return SECTOR_SECONDARY;
    }
    if targets.iter().any(|t| reference.same_family(t, business.sector())) {
        return SECTOR_FAMILY;
    }
    0
}

fn location_points(targets: &[String], business: &BusinessProfile, reference: &ReferenceData) -> u8 {
    if targets.is_empty() {
        return LOCATION_NO_PREFERENCE;
    }
    let location = business.location();
    let regional_hit = contains_ignore_case(targets, &location.state)
        || location
            .city
            .as_deref()
            .is_some_and(|city| contains_ignore_case(targets, city));
    if regional_hit {
        return LOCATION_WEIGHT;
    }
    let country = location.country.trim();
    let same_country = contains_ignore_case(targets, country)
        || targets.iter().any(|t| {
            reference
                .country_of(t)
                .is_some_and(|c| c.eq_ignore_ascii_case(country))
        });
    if same_country {
        return LOCATION_COUNTRY;
    }
    0
}

/// Full credit inside the range, linear decay outside it.
fn capital_points(range: CapitalRange, ask: Option<u64>) -> u8 {
    let Some(ask) = ask else {
        return 0;
    };
    let weight = CAPITAL_WEIGHT as u128;
    let (ask, min, max) = (ask as u128, range.min as u128, range.max as u128);
    let points = if range.contains(ask as u64) {
        weight
    } else if ask < min {
        weight * ask / min
    } else if max == 0 {
        0
    } else {
        (weight * (2 * max).saturating_sub(ask)) / max
    };
    points.min(weight) as u8
}

fn risk_points(appetite: RiskAppetite, stage: BusinessStage) -> u8 {
    match (appetite.ordinal() - RiskAppetite::implied_by(stage).ordinal()).abs() {
        0 => RISK_WEIGHT,
        1 => ADJACENT,
        _ => 0,
    }
}

fn stage_points(preferred: &[BusinessStage], stage: BusinessStage) -> u8 {
    if preferred.is_empty() {
        return ADJACENT;
    }
    if preferred.contains(&stage) {
        return STAGE_WEIGHT;
    }
    if preferred
        .iter()
        .any(|p| (p.ordinal() - stage.ordinal()).abs() == 1)
    {
        return ADJACENT;
    }
    0
}

//! Business profile aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BusinessId, DomainError, StateMachine, Timestamp, UserId, ValidationError,
};

pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
pub const MAX_CREDIBILITY: u8 = 100;

/// Lifecycle stage of a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStage {
    Idea,
    Early,
    Growth,
    Established,
}

impl BusinessStage {
    pub const ALL: [BusinessStage; 4] = [
        BusinessStage::Idea,
        BusinessStage::Early,
        BusinessStage::Growth,
        BusinessStage::Established,
    ];

    pub fn ordinal(&self) -> i32 {
        match self {
            BusinessStage::Idea => 0,
            BusinessStage::Early => 1,
            BusinessStage::Growth => 2,
            BusinessStage::Established => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessStage::Idea => "idea",
            BusinessStage::Early => "early",
            BusinessStage::Growth => "growth",
            BusinessStage::Established => "established",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stage| stage.as_str() == s)
    }
}

/// Verification state of the business as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Unverified => "unverified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unverified" => Some(VerificationStatus::Unverified),
            "pending" => Some(VerificationStatus::Pending),
            "verified" => Some(VerificationStatus::Verified),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }
}

impl StateMachine for VerificationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use VerificationStatus::*;
        match self {
            Unverified => vec![Pending],
            Pending => vec![Verified, Rejected],
            Rejected => vec![Pending],
            // Revocation of an earlier approval
            Verified => vec![Rejected],
        }
    }
}

/// Where a business operates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Location {
    pub fn new(country: impl Into<String>, state: impl Into<String>, city: Option<String>) -> Self {
        Self {
            country: country.into(),
            state: state.into(),
            city,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.country.trim().is_empty() {
            return Err(ValidationError::empty_field("location.country"));
        }
        if self.state.trim().is_empty() {
            return Err(ValidationError::empty_field("location.state"));
        }
        Ok(())
    }
}

/// Owner-editable sections of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfileDraft {
    pub name: String,
    pub sector: String,
    #[serde(default)]
    pub subsector: Option<String>,
    #[serde(default)]
    pub secondary_sectors: Vec<String>,
    pub location: Location,
    pub stage: BusinessStage,
    #[serde(default)]
    pub funding_ask: Option<u64>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub annual_revenue: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BusinessProfileDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "name",
                1,
                MAX_NAME_LENGTH as i64,
                name.len() as i64,
            ));
        }
        if self.sector.trim().is_empty() {
            return Err(ValidationError::empty_field("sector"));
        }
        self.location.validate()?;
        if let Some(email) = &self.contact_email {
            if !email.contains('@') {
                return Err(ValidationError::invalid_format(
                    "contact_email",
                    "missing @ symbol",
                ));
            }
        }
        if let Some(description) = &self.description {
            if description.len() > MAX_DESCRIPTION_LENGTH {
                return Err(ValidationError::out_of_range(
                    "description",
                    0,
                    MAX_DESCRIPTION_LENGTH as i64,
                    description.len() as i64,
                ));
            }
        }
        Ok(())
    }
}

/// Business profile aggregate.
///
/// # Invariants
///
/// - Owned by exactly one user
/// - `verification_status` and `credibility_score` change only through
///   verification operations
/// - `credibility_score` is within 0..=100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    id: BusinessId,
    owner_id: UserId,
    details: BusinessProfileDraft,
    verification_status: VerificationStatus,
    credibility_score: u8,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl BusinessProfile {
    /// Creates an unverified profile.
    ///
    /// # Errors
    ///
    /// - Validation errors for blank name, sector or location
    pub fn new(
        id: BusinessId,
        owner_id: UserId,
        details: BusinessProfileDraft,
    ) -> Result<Self, DomainError> {
        details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            owner_id,
            details,
            verification_status: VerificationStatus::Unverified,
            credibility_score: 0,
            created_at: now,
            updated_at: now,
            version: 1,
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BusinessId,
        owner_id: UserId,
        details: BusinessProfileDraft,
        verification_status: VerificationStatus,
        credibility_score: u8,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            owner_id,
            details,
            verification_status,
            credibility_score,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &BusinessId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn details(&self) -> &BusinessProfileDraft {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn sector(&self) -> &str {
        &self.details.sector
    }

    pub fn subsector(&self) -> Option<&str> {
        self.details.subsector.as_deref()
    }

    pub fn secondary_sectors(&self) -> &[String] {
        &self.details.secondary_sectors
    }

    pub fn location(&self) -> &Location {
        &self.details.location
    }

    pub fn stage(&self) -> BusinessStage {
        self.details.stage
    }

    pub fn funding_ask(&self) -> Option<u64> {
        self.details.funding_ask
    }

    pub fn verification_status(&self) -> VerificationStatus {
        self.verification_status
    }

    pub fn credibility_score(&self) -> u8 {
        self.credibility_score
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Jurisdictions this business falls under: its country and state.
    pub fn jurisdiction_scopes(&self) -> [&str; 2] {
        [
            self.details.location.country.as_str(),
            self.details.location.state.as_str(),
        ]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the owner-editable sections.
    pub fn update_details(&mut self, details: BusinessProfileDraft) -> Result<(), DomainError> {
        details.validate()?;
        self.details = details;
        self.touch();
        Ok(())
    }

    /// Owner requests review: `unverified | rejected -> pending`.
    pub fn submit_for_verification(&mut self) -> Result<VerificationStatus, DomainError> {
        let previous = self.verification_status;
        self.verification_status = previous.transition_to(VerificationStatus::Pending)?;
        self.touch();
        Ok(previous)
    }

    /// Officer decision on the business as a whole, returning the previous status.
    ///
    /// A same-status update is allowed only to adjust credibility.
    pub fn update_verification(
        &mut self,
        status: VerificationStatus,
        credibility: Option<u8>,
    ) -> Result<VerificationStatus, DomainError> {
        if let Some(score) = credibility {
            if score > MAX_CREDIBILITY {
                return Err(ValidationError::out_of_range(
                    "credibility_score",
                    0,
                    MAX_CREDIBILITY as i64,
                    score as i64,
                )
                .into());
            }
        }

        let previous = self.verification_status;
        if status != previous || credibility.is_none() {
            self.verification_status = previous.transition_to(status)?;
        }
        if let Some(score) = credibility {
            self.credibility_score = score;
        }
        self.touch();
        Ok(previous)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
        self.version += 1;
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn new_profile_is_unverified() {
        let profile = business("owner", "Fintech", "Lagos", Some(20_000));
        assert_eq!(profile.verification_status(), VerificationStatus::Unverified);
        assert_eq!(profile.credibility_score(), 0);
        assert_eq!(profile.jurisdiction_scopes(), ["Nigeria", "Lagos"]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut d = draft("Fintech", "Lagos", None);
        d.name = "  ".to_string();
        let err = BusinessProfile::new(BusinessId::new(), UserId::new("o").unwrap(), d).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn invalid_contact_email_is_rejected() {
        let mut d = draft("Fintech", "Lagos", None);
        d.contact_email = Some("nope".to_string());
        let err = BusinessProfile::new(BusinessId::new(), UserId::new("o").unwrap(), d).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn submit_moves_to_pending_once() {
        let mut profile = business("owner", "Fintech", "Lagos", None);
        profile.submit_for_verification().unwrap();
        assert_eq!(profile.verification_status(), VerificationStatus::Pending);

        let err = profile.submit_for_verification().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn officer_verifies_pending_business_with_credibility() {
        let mut profile = business("owner", "Fintech", "Lagos", None);
        profile.submit_for_verification().unwrap();
        let previous = profile
            .update_verification(VerificationStatus::Verified, Some(85))
            .unwrap();
        assert_eq!(previous, VerificationStatus::Pending);
        assert_eq!(profile.credibility_score(), 85);
    }

    #[test]
    fn cannot_verify_unsubmitted_business() {
        let mut profile = business("owner", "Fintech", "Lagos", None);
        let err = profile
            .update_verification(VerificationStatus::Verified, None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn credibility_only_update_keeps_status() {
        let mut profile = business("owner", "Fintech", "Lagos", None);
        profile.submit_for_verification().unwrap();
        profile.update_verification(VerificationStatus::Verified, Some(60)).unwrap();
        profile.update_verification(VerificationStatus::Verified, Some(70)).unwrap();
        assert_eq!(profile.verification_status(), VerificationStatus::Verified);
        assert_eq!(profile.credibility_score(), 70);
    }

    #[test]
    fn credibility_above_100_is_rejected() {
        let mut profile = business("owner", "Fintech", "Lagos", None);
        profile.submit_for_verification().unwrap();
        let err = profile
            .update_verification(VerificationStatus::Verified, Some(101))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(profile.verification_status(), VerificationStatus::Pending);
    }

    #[test]
    fn update_details_bumps_version() {
        let mut profile = business("owner", "Fintech", "Lagos", None);
        profile.update_details(draft("Agritech", "Oyo", Some(5_000))).unwrap();
        assert_eq!(profile.sector(), "Agritech");
        assert_eq!(profile.version(), 2);
    }
}

//! Timestamp value object for immutable points in time.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Precision is truncated to microseconds so values survive a round trip
/// through PostgreSQL `TIMESTAMPTZ` unchanged. Audit hashes depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(6))
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(6))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the calendar date in UTC.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// RFC 3339 representation with microsecond precision.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

//! Investor module - investment preferences.

mod preferences;

pub use preferences::{CapitalRange, InvestorPreferences, PreferencesInput, RiskAppetite};

#[cfg(test)]
pub(crate) use preferences::fixtures;

//! Investor handlers.

mod save_investor_preferences;

pub use save_investor_preferences::{SaveInvestorPreferencesCommand, SaveInvestorPreferencesHandler};

//! Application settings
//!
//! Stored in `config.json` at the base directory. Every field has a default
//! so a missing or partial file still loads.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;

/// Application settings shared by all users on this installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown after amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How long a login stays valid, in days
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u32,

    /// How long a password reset code stays valid, in minutes
    #[serde(default = "default_reset_ttl_minutes")]
    pub reset_ttl_minutes: u32,

    /// Minimum password length accepted at registration
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Number of expenses listed under "Top expenses" on the dashboard
    #[serde(default = "default_top_expense_count")]
    pub top_expense_count: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "kr".to_string()
}

fn default_session_ttl_days() -> u32 {
    30
}

fn default_reset_ttl_minutes() -> u32 {
    60
}

fn default_min_password_length() -> usize {
    8
}

fn default_top_expense_count() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            session_ttl_days: default_session_ttl_days(),
            reset_ttl_minutes: default_reset_ttl_minutes(),
            min_password_length: default_min_password_length(),
            top_expense_count: default_top_expense_count(),
        }
    }
}

impl Settings {
    /// Session lifetime as a duration
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.session_ttl_days.max(1)))
    }

    /// Reset code lifetime as a duration
    pub fn reset_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.reset_ttl_minutes.max(1)))
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller decides to
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

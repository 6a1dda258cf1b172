//! Custom error types for the household budget
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Frequency;

/// Rejections raised while validating an expense's month schedule
///
/// These are raised at the mutation boundary (creating or editing an
/// expense) and must prevent the record from being stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A supplied month value is outside 1-12
    #[error("Invalid month: {0} (months must be between 1 and 12)")]
    InvalidMonth(i64),

    /// The number of distinct months does not match the frequency
    #[error("A {frequency} expense needs exactly {required} month(s), got {given}")]
    MonthCountMismatch {
        frequency: Frequency,
        required: usize,
        given: usize,
    },
}

/// The main error type for household budget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Month schedule rejected for an expense
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity is still referenced and cannot be removed
    #[error("{entity_type} '{identifier}' is used by {usage} expense(s)")]
    InUse {
        entity_type: &'static str,
        identifier: String,
        usage: usize,
    },

    /// Authentication and session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Mutation attempted in demo mode
    #[error("Demo mode is read-only: {0}")]
    ReadOnly(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BudgetError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income sources
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bank accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// The caller is not logged in (or the session expired)
    pub fn not_logged_in() -> Self {
        Self::Auth("Not logged in. Run 'budget login' first.".into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (including schedule rejections)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Schedule(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for household budget operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetError::expense_not_found("Husleje");
        assert_eq!(err.to_string(), "Expense not found: Husleje");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_schedule_errors_are_validation() {
        let err: BudgetError = ScheduleError::InvalidMonth(13).into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid month: 13 (months must be between 1 and 12)"
        );

        let err: BudgetError = ScheduleError::MonthCountMismatch {
            frequency: Frequency::SemiAnnual,
            required: 2,
            given: 1,
        }
        .into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("exactly 2 month(s)"));
    }

    #[test]
    fn test_in_use_error() {
        let err = BudgetError::InUse {
            entity_type: "Category",
            identifier: "Bolig".into(),
            usage: 3,
        };
        assert_eq!(err.to_string(), "Category 'Bolig' is used by 3 expense(s)");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let budget_err: BudgetError = io_err.into();
        assert!(matches!(budget_err, BudgetError::Io(_)));
    }
}

//! Income source model
//!
//! Income is always spread evenly across the year; unlike expenses it has
//! no month schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use super::ids::IncomeId;
use super::money::Money;
use crate::allocation;

/// Validation errors for income sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptyName,
    NegativeAmount,
    AmountTooLarge,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Income source name cannot be empty"),
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
            Self::AmountTooLarge => write!(f, "Income amount cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// One source of household income (a person's salary, a bonus, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    /// Source label, unique per user (case-insensitive)
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub frequency: Frequency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    /// Create a new income source
    pub fn new(name: impl Into<String>, amount: Money, frequency: Frequency) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            name: name.into(),
            amount,
            frequency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set amount and frequency together
    pub fn set_amount(&mut self, amount: Money, frequency: Frequency) {
        self.amount = amount;
        self.frequency = frequency;
        self.updated_at = Utc::now();
    }

    /// Monthly equivalent of this source
    pub fn monthly_amount(&self) -> Money {
        allocation::monthly_equivalent(self.amount, self.frequency)
    }

    /// Validate the income source
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.name.trim().is_empty() {
            return Err(IncomeValidationError::EmptyName);
        }
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(IncomeValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_income() {
        let income = Income::new("Person 1", Money::from_units(28000), Frequency::Monthly);
        assert_eq!(income.name, "Person 1");
        assert_eq!(income.monthly_amount(), Money::from_units(28000));
    }

    #[test]
    fn test_monthly_amount_for_yearly() {
        let income = Income::new("Annual Bonus", Money::from_units(24000), Frequency::Yearly);
        assert_eq!(income.monthly_amount(), Money::from_units(2000));
    }

    #[test]
    fn test_monthly_amount_for_semi_annual() {
        let income = Income::new("Bonus", Money::from_units(30000), Frequency::SemiAnnual);
        assert_eq!(income.monthly_amount(), Money::from_units(5000));
    }

    #[test]
    fn test_validation_negative_amount() {
        let income = Income::new("Salary", Money::from_cents(-100), Frequency::Monthly);
        assert_eq!(income.validate(), Err(IncomeValidationError::NegativeAmount));
    }

    #[test]
    fn test_validation_amount_limit() {
        let mut income = Income::new("Salary", Money::MAX, Frequency::Monthly);
        assert!(income.validate().is_ok());
        assert_eq!(income.monthly_amount(), Money::MAX);

        income.amount = Money::MAX + Money::from_cents(1);
        assert_eq!(income.validate(), Err(IncomeValidationError::AmountTooLarge));
    }

    #[test]
    fn test_validation_empty_name() {
        let income = Income::new(" ", Money::from_units(100), Frequency::Monthly);
        assert_eq!(income.validate(), Err(IncomeValidationError::EmptyName));
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let income = Income::new("Placeholder", Money::zero(), Frequency::Monthly);
        assert!(income.validate().is_ok());
    }

    #[test]
    fn test_missing_frequency_defaults_to_monthly() {
        let income = Income::new("Salary", Money::from_units(100), Frequency::Yearly);
        let mut json = serde_json::to_value(&income).unwrap();
        json.as_object_mut().unwrap().remove("frequency");

        let deserialized: Income = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized.frequency, Frequency::Monthly);
    }
}

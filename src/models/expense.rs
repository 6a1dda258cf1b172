//! Expense model
//!
//! A recurring or periodic cost. The amount is the nominal amount charged
//! per occurrence, never pre-divided by the frequency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::ids::ExpenseId;
use super::money::Money;
use super::schedule::MonthSchedule;
use crate::allocation::{self, MonthlySeries};

/// A recurring household expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the expense is (e.g., "Husleje")
    pub name: String,

    /// Reporting label; matches a category name by convention only
    pub category: String,

    /// Amount charged per occurrence
    pub amount: Money,

    /// How often `amount` is charged
    pub frequency: Frequency,

    /// Bank account the expense is paid from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Months the charge falls in
    #[serde(default, rename = "months")]
    pub schedule: MonthSchedule,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense spread evenly over the year
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        frequency: Frequency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            name: name.into(),
            category: category.into(),
            amount,
            frequency,
            account: None,
            schedule: MonthSchedule::Spread,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style month schedule (tests and demo data)
    pub fn with_schedule(mut self, schedule: MonthSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Builder-style account assignment
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Change the frequency
    ///
    /// A changed frequency invalidates the month schedule, which is reset to
    /// `Spread`. Callers supplying new months must set them afterwards.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        if self.frequency != frequency {
            self.frequency = frequency;
            self.schedule = MonthSchedule::Spread;
        }
        self.updated_at = Utc::now();
    }

    /// Replace the month schedule (must already be validated)
    pub fn set_schedule(&mut self, schedule: MonthSchedule) {
        self.schedule = schedule;
        self.updated_at = Utc::now();
    }

    /// Yearly total implied by amount and frequency
    pub fn yearly_total(&self) -> Money {
        allocation::yearly_total(self.amount, self.frequency)
    }

    /// Single-value monthly equivalent used by the dashboard
    pub fn monthly_amount(&self) -> Money {
        allocation::monthly_equivalent(self.amount, self.frequency)
    }

    /// Twelve-month breakdown used by the yearly overview
    pub fn monthly_amounts(&self) -> MonthlySeries {
        allocation::allocate(self.amount, self.frequency, &self.schedule)
    }

    /// Validate the expense fields
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if self.name.len() > 100 {
            return Err(ExpenseValidationError::NameTooLong(self.name.len()));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge);
        }
        if self.frequency == Frequency::Monthly && !self.schedule.is_spread() {
            return Err(ExpenseValidationError::MonthsOnMonthly);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.amount, self.frequency)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NameTooLong(usize),
    EmptyCategory,
    NonPositiveAmount,
    AmountTooLarge,
    MonthsOnMonthly,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Expense name too long ({} chars, max 100)", len)
            }
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Expense amount must be positive"),
            Self::AmountTooLarge => {
                write!(f, "Expense amount cannot exceed {}", Money::MAX)
            }
            Self::MonthsOnMonthly => {
                write!(f, "Monthly expenses cannot be assigned to specific months")
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;

    #[test]
    fn test_new_expense_is_spread() {
        let expense = Expense::new("Husleje", "Bolig", Money::from_units(12000), Frequency::Monthly);
        assert_eq!(expense.name, "Husleje");
        assert!(expense.schedule.is_spread());
        assert!(expense.account.is_none());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_frequency_change_clears_months() {
        let mut expense = Expense::new("Bilforsikring", "Transport", Money::from_units(6000), Frequency::SemiAnnual)
            .with_schedule(MonthSchedule::explicit([Month::new(3).unwrap(), Month::new(9).unwrap()]));

        expense.set_frequency(Frequency::SemiAnnual);
        assert!(!expense.schedule.is_spread());

        expense.set_frequency(Frequency::Monthly);
        assert!(expense.schedule.is_spread());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new("Netflix", "Abonnementer", Money::from_units(129), Frequency::Monthly);
        assert!(expense.validate().is_ok());

        expense.amount = Money::zero();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::NonPositiveAmount));

        expense.amount = Money::MAX;
        assert!(expense.validate().is_ok());
        expense.amount = Money::MAX + Money::from_cents(1);
        assert_eq!(expense.validate(), Err(ExpenseValidationError::AmountTooLarge));

        expense.amount = Money::from_units(129);
        expense.name = "  ".into();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));

        expense.name = "Netflix".into();
        expense.category = String::new();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyCategory));

        expense.category = "Abonnementer".into();
        expense.schedule = MonthSchedule::explicit([Month::JANUARY]);
        assert_eq!(expense.validate(), Err(ExpenseValidationError::MonthsOnMonthly));
    }

    #[test]
    fn test_monthly_amount() {
        let expense = Expense::new("Forsikring", "Forsikring", Money::from_units(12000), Frequency::Yearly);
        assert_eq!(expense.monthly_amount(), Money::from_units(1000));
        assert_eq!(expense.yearly_total(), Money::from_units(12000));
    }

    #[test]
    fn test_serialization_keeps_months_key() {
        let expense = Expense::new("Skat", "Bolig", Money::from_units(18000), Frequency::Yearly)
            .with_schedule(MonthSchedule::explicit([Month::new(7).unwrap()]));

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["months"], serde_json::json!([7]));
        assert_eq!(json["frequency"], "yearly");

        let deserialized: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, expense);
    }
}

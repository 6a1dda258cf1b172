//! Expense service
//!
//! Provides business logic for expenses: creation and partial edits with
//! month-schedule validation, deletion, and grouped listings. A schedule is
//! checked against the expense's frequency before anything is stored.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::allocation::validate_months;
use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, Frequency, Money, MonthSchedule};
use crate::storage::UserStorage;

use super::resolve;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a UserStorage,
}

/// Input for creating an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub name: String,
    pub category: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub account: Option<String>,
    /// Raw month numbers as typed; validated against `frequency`
    pub months: Vec<i64>,
}

/// A partial edit; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub frequency: Option<Frequency>,
    /// `Some(None)` removes the account
    pub account: Option<Option<String>>,
    pub months: Option<Vec<i64>>,
    /// Drop any explicit months and spread evenly
    pub spread: bool,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.frequency.is_none()
            && self.account.is_none()
            && self.months.is_none()
            && !self.spread
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a UserStorage) -> Self {
        Self { storage }
    }

    /// Create a new expense
    pub fn create(&self, input: NewExpense) -> BudgetResult<Expense> {
        self.storage.ensure_writable("add expenses")?;

        let schedule = validate_months(&input.months, input.frequency)?;
        let category = self.canonical_category(&input.category)?;

        let mut expense = Expense::new(input.name.trim(), category, input.amount, input.frequency)
            .with_schedule(schedule);
        if let Some(account) = input.account.as_deref() {
            expense.account = Some(self.canonical_account(account)?);
        }

        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Find an expense by name or ID
    pub fn find(&self, identifier: &str) -> BudgetResult<Expense> {
        resolve(&self.storage.expenses, identifier, |id| {
            BudgetError::expense_not_found(id)
        })
    }

    /// All expenses in the order they were added
    pub fn list(&self) -> BudgetResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Expenses grouped by category name
    pub fn list_by_category(&self) -> BudgetResult<BTreeMap<String, Vec<Expense>>> {
        let mut grouped: BTreeMap<String, Vec<Expense>> = BTreeMap::new();
        for expense in self.list()? {
            grouped
                .entry(expense.category.clone())
                .or_default()
                .push(expense);
        }
        Ok(grouped)
    }

    /// Total monthly-equivalent expenses
    pub fn total_monthly(&self) -> BudgetResult<Money> {
        Ok(self.list()?.iter().map(Expense::monthly_amount).sum())
    }

    /// Apply a partial edit
    ///
    /// A frequency change clears the month schedule unless new months are
    /// supplied in the same edit; supplied months are always validated
    /// against the frequency the expense ends up with.
    pub fn update(&self, identifier: &str, update: ExpenseUpdate) -> BudgetResult<Expense> {
        self.storage.ensure_writable("edit expenses")?;

        let mut expense = self.find(identifier)?;
        let before = expense.clone();

        if update.spread && update.months.is_some() {
            return Err(BudgetError::Validation(
                "Cannot give months and --spread together".into(),
            ));
        }

        if let Some(name) = update.name.as_deref() {
            expense.name = name.trim().to_string();
        }
        if let Some(category) = update.category.as_deref() {
            expense.category = self.canonical_category(category)?;
        }
        if let Some(amount) = update.amount {
            expense.amount = amount;
        }
        if let Some(account) = update.account {
            expense.account = match account {
                Some(name) => Some(self.canonical_account(&name)?),
                None => None,
            };
        }
        if let Some(frequency) = update.frequency {
            expense.set_frequency(frequency);
        }
        if let Some(months) = update.months.as_deref() {
            expense.set_schedule(validate_months(months, expense.frequency)?);
        } else if update.spread {
            expense.set_schedule(MonthSchedule::Spread);
        }
        expense.updated_at = Utc::now();

        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, identifier: &str) -> BudgetResult<Expense> {
        self.storage.ensure_writable("delete expenses")?;

        let expense = self.find(identifier)?;
        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Use the registry's spelling of a category if it has one
    ///
    /// Expense categories are free labels; an unknown one is kept as typed.
    fn canonical_category(&self, category: &str) -> BudgetResult<String> {
        let category = category.trim();
        match self.storage.categories.get_by_name(category)? {
            Some(existing) => Ok(existing.name),
            None => {
                log::warn!("Category '{}' is not in the category list", category);
                Ok(category.to_string())
            }
        }
    }

    /// Accounts must exist before an expense can be charged to them
    fn canonical_account(&self, account: &str) -> BudgetResult<String> {
        self.storage
            .accounts
            .get_by_name(account)?
            .map(|a| a.name)
            .ok_or_else(|| BudgetError::account_not_found(account.trim()))
    }
}

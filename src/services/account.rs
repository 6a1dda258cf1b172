//! Account service
//!
//! Bank accounts are labels an expense can be charged to. Like categories
//! they are referenced by name from expenses.

use chrono::Utc;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Money};
use crate::storage::UserStorage;

use super::resolve;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a UserStorage,
}

/// An account with what is charged to it
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    /// Number of expenses charged to the account
    pub expense_count: usize,
    /// Sum of those expenses' monthly equivalents
    pub monthly_total: Money,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a UserStorage) -> Self {
        Self { storage }
    }

    /// Create a new account
    pub fn create(&self, name: &str) -> BudgetResult<Account> {
        self.storage.ensure_writable("add accounts")?;

        let name = name.trim();
        if self.storage.accounts.name_exists(name, None)? {
            return Err(BudgetError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let account = Account::new(name);
        account
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }

    /// Find an account by name or ID
    pub fn find(&self, identifier: &str) -> BudgetResult<Account> {
        resolve(&self.storage.accounts, identifier, |id| {
            BudgetError::account_not_found(id)
        })
    }

    /// Get all accounts with their charged totals
    pub fn list_with_totals(&self) -> BudgetResult<Vec<AccountSummary>> {
        let expenses = self.storage.expenses.get_all()?;
        let mut accounts = self.storage.accounts.get_all()?;
        accounts.sort_by_key(|a| a.name.to_lowercase());

        Ok(accounts
            .into_iter()
            .map(|account| {
                let charged: Vec<_> = expenses
                    .iter()
                    .filter(|e| e.account.as_deref() == Some(account.name.as_str()))
                    .collect();
                AccountSummary {
                    expense_count: charged.len(),
                    monthly_total: charged.iter().map(|e| e.monthly_amount()).sum(),
                    account,
                }
            })
            .collect())
    }

    /// Rename an account, returning it and the number of expenses updated
    pub fn rename(&self, identifier: &str, new_name: &str) -> BudgetResult<(Account, usize)> {
        self.storage.ensure_writable("rename accounts")?;

        let mut account = self.find(identifier)?;
        let before = account.clone();

        let new_name = new_name.trim();
        if self.storage.accounts.name_exists(new_name, Some(account.id))? {
            return Err(BudgetError::Duplicate {
                entity_type: "Account",
                identifier: new_name.to_string(),
            });
        }
        account.name = new_name.to_string();
        account.updated_at = Utc::now();

        account
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_update(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        let mut audit = Vec::new();
        for expense in self.storage.expenses.get_all()? {
            if expense.account.as_deref() != Some(before.name.as_str()) {
                continue;
            }
            let mut updated = expense.clone();
            updated.account = Some(account.name.clone());
            updated.updated_at = Utc::now();
            self.storage.expenses.upsert(updated.clone())?;

            audit.push(AuditEntry::update(
                EntityType::Expense,
                updated.id.to_string(),
                Some(updated.name.clone()),
                &expense,
                &updated,
                Some(format!("account: \"{}\" -> \"{}\"", before.name, account.name)),
            ));
        }
        if !audit.is_empty() {
            self.storage.expenses.save()?;
            self.storage.log_batch(&audit)?;
        }

        Ok((account, audit.len()))
    }

    /// Delete an account no expense is charged to
    pub fn delete(&self, identifier: &str) -> BudgetResult<Account> {
        self.storage.ensure_writable("delete accounts")?;

        let account = self.find(identifier)?;
        let usage = self
            .storage
            .expenses
            .get_all()?
            .iter()
            .filter(|e| e.account.as_deref() == Some(account.name.as_str()))
            .count();
        if usage > 0 {
            return Err(BudgetError::InUse {
                entity_type: "Account",
                identifier: account.name,
                usage,
            });
        }

        self.storage.accounts.delete(account.id)?;
        self.storage.accounts.save()?;

        self.storage.log_delete(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }
}

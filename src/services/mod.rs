//! Service layer for the household budget
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, schedule checks, cascades between records and the
//! audit trail. Every mutation goes through a service.

pub mod account;
pub mod auth;
pub mod category;
pub mod expense;
pub mod income;

pub use account::{AccountService, AccountSummary};
pub use auth::AuthService;
pub use category::{CategoryService, CategoryUsage};
pub use expense::{ExpenseService, ExpenseUpdate, NewExpense};
pub use income::{IncomeEntry, IncomeService};

use crate::error::{BudgetError, BudgetResult};
use crate::storage::{Record, Repository};

/// Resolve a user-typed identifier to exactly one record
///
/// A case-insensitive name match wins; otherwise the identifier is matched
/// against record IDs (full UUID, short form or prefix). A prefix that
/// matches several records is rejected rather than guessed.
pub(crate) fn resolve<T: Record>(
    repo: &Repository<T>,
    identifier: &str,
    not_found: fn(String) -> BudgetError,
) -> BudgetResult<T> {
    if let Some(record) = repo.get_by_name(identifier)? {
        return Ok(record);
    }

    let mut matches = repo.find_by_key(identifier)?;
    match matches.len() {
        0 => Err(not_found(identifier.to_string())),
        1 => Ok(matches.remove(0)),
        n => Err(BudgetError::Validation(format!(
            "'{}' matches {} records, use a longer ID",
            identifier, n
        ))),
    }
}

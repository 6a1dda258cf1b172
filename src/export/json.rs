//! JSON Export functionality
//!
//! Exports a user's complete record set, or the yearly overview, to JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Category, Expense, Income};
use crate::reports::YearlyOverview;
use crate::storage::UserStorage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full record set of one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub income: Vec<Income>,

    pub expenses: Vec<Expense>,

    pub categories: Vec<Category>,

    pub accounts: Vec<Account>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub income_count: usize,
    pub expense_count: usize,
    pub category_count: usize,
    pub account_count: usize,
}

impl FullExport {
    /// Create a new full export from a user's storage
    pub fn from_storage(storage: &UserStorage) -> BudgetResult<Self> {
        let income = storage.income.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let categories = storage.categories.get_all()?;
        let accounts = storage.accounts.get_all()?;

        let metadata = ExportMetadata {
            income_count: income.len(),
            expense_count: expenses.len(),
            category_count: categories.len(),
            account_count: accounts.len(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            income,
            expenses,
            categories,
            accounts,
            metadata,
        })
    }
}

/// Export the full record set to JSON
pub fn export_full_json<W: Write>(storage: &UserStorage, writer: &mut W, pretty: bool) -> BudgetResult<()> {
    let export = FullExport::from_storage(storage)?;
    write_json(writer, &export, pretty)
}

/// Export the yearly overview to JSON
///
/// Month series are objects keyed "1" to "12" with amounts in hundredths.
pub fn export_overview_json<W: Write>(overview: &YearlyOverview, writer: &mut W, pretty: bool) -> BudgetResult<()> {
    write_json(writer, overview, pretty)
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> BudgetResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    };
    result.map_err(|e| BudgetError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

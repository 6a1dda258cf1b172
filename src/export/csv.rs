//! CSV Export functionality
//!
//! Exports the yearly overview and the expense list to CSV.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Month;
use crate::reports::YearlyOverview;
use crate::storage::UserStorage;

/// Export the yearly overview to CSV
pub fn export_overview_csv<W: Write>(overview: &YearlyOverview, writer: &mut W) -> BudgetResult<()> {
    overview.export_csv(writer)
}

/// Export every expense with its month-by-month charges
pub fn export_expenses_csv<W: Write>(storage: &UserStorage, writer: &mut W) -> BudgetResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = ["ID", "Name", "Category", "Amount", "Frequency", "Account", "Months"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    header.extend(Month::all().map(|m| m.abbrev().to_string()));
    csv_writer
        .write_record(&header)
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    for expense in storage.expenses.get_all()? {
        let months: Vec<String> = expense
            .schedule
            .months()
            .iter()
            .map(|m| m.number().to_string())
            .collect();

        let mut record = vec![
            expense.id.to_string(),
            expense.name.clone(),
            expense.category.clone(),
            expense.amount.to_string(),
            expense.frequency.as_str().to_string(),
            expense.account.clone().unwrap_or_default(),
            months.join(";"),
        ];
        let series = expense.monthly_amounts();
        record.extend(series.values().iter().map(|m| m.to_string()));

        csv_writer
            .write_record(&record)
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

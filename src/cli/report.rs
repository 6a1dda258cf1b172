//! CLI commands for reports
//!
//! `overview` shows the month-by-month yearly overview, `dashboard` the
//! monthly-equivalent summary.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::reports::{DashboardReport, YearlyOverview};
use crate::storage::UserStorage;

/// Print the yearly overview, or write it as CSV when `output` is given
pub fn handle_overview(storage: &UserStorage, output: Option<&Path>) -> BudgetResult<()> {
    let overview = YearlyOverview::generate(storage)?;

    match output {
        Some(path) => {
            let file = create_file(path)?;
            overview.export_csv(BufWriter::new(file))?;
            println!("Yearly overview exported to: {}", path.display());
        }
        None => {
            if overview.is_empty() {
                println!("No income or expenses yet. Add some with 'budget income set' and 'budget expense add'.");
                return Ok(());
            }
            print!("{}", overview.format_terminal());
        }
    }

    Ok(())
}

/// Print the monthly dashboard
pub fn handle_dashboard(storage: &UserStorage, settings: &Settings, top: Option<usize>) -> BudgetResult<()> {
    let top = top.unwrap_or(settings.top_expense_count);
    let report = DashboardReport::generate(storage, top)?;
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}

pub(crate) fn create_file(path: &Path) -> BudgetResult<File> {
    File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })
}

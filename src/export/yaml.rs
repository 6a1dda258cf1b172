//! YAML Export functionality

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::FullExport;
use crate::reports::YearlyOverview;
use crate::storage::UserStorage;

/// Export the full record set to YAML
pub fn export_full_yaml<W: Write>(storage: &UserStorage, writer: &mut W) -> BudgetResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# Household budget export")
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are in hundredths (12000.00 is 1200000).")
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

/// Export the yearly overview to YAML
pub fn export_overview_yaml<W: Write>(overview: &YearlyOverview, writer: &mut W) -> BudgetResult<()> {
    serde_yaml::to_writer(writer, overview).map_err(|e| BudgetError::Export(e.to_string()))
}

//! Audit log CLI command

use std::str::FromStr;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::storage::UserStorage;

/// Print the most recent audit entries, newest first
pub fn handle_audit_command(
    storage: &UserStorage,
    limit: usize,
    entity: Option<&str>,
    verbose: bool,
) -> BudgetResult<()> {
    let Some(logger) = storage.audit() else {
        println!("The demo household has no audit log.");
        return Ok(());
    };

    let entity_type = entity
        .map(EntityType::from_str)
        .transpose()
        .map_err(|e| BudgetError::Validation(e.to_string()))?;

    let entries = logger.read_recent(limit, entity_type)?;
    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in entries.into_iter().rev() {
        if verbose {
            println!("{}", entry.format_human_readable());
        } else {
            let name = entry.entity_name.as_deref().unwrap_or("");
            println!(
                "{}  {:<6} {} {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.operation,
                entry.entity_type,
                name
            );
        }
    }

    Ok(())
}

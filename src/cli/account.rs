//! Account CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_account_list;
use crate::error::BudgetResult;
use crate::services::AccountService;
use crate::storage::UserStorage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// List accounts with the monthly amount charged to each
    List,

    /// Create a new account
    Add {
        /// Account name
        name: String,
    },

    /// Rename an account (expenses follow the rename)
    Rename {
        /// Account name or ID
        account: String,
        /// New name
        new_name: String,
    },

    /// Delete an account no expense is charged to
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(storage: &UserStorage, settings: &Settings, cmd: AccountCommands) -> BudgetResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::List => {
            let summaries = service.list_with_totals()?;
            println!("{}", format_account_list(&summaries, &settings.currency_symbol));
        }

        AccountCommands::Add { name } => {
            let account = service.create(&name)?;
            println!("Created account: {}", account.name);
            println!("  ID: {}", account.id);
        }

        AccountCommands::Rename { account, new_name } => {
            let (renamed, moved) = service.rename(&account, &new_name)?;
            println!("Renamed account to: {}", renamed.name);
            if moved > 0 {
                println!("Updated {} expense(s).", moved);
            }
        }

        AccountCommands::Delete { account } => {
            let deleted = service.delete(&account)?;
            println!("Deleted account: {}", deleted.name);
        }
    }

    Ok(())
}

//! Income CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_income_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Frequency, Money};
use crate::services::{IncomeEntry, IncomeService};
use crate::storage::UserStorage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List income sources with monthly equivalents
    List,

    /// Add an income source or change an existing one
    Set {
        /// Source name (e.g. "Person 1")
        name: String,
        /// Amount per occurrence (e.g. "28000" or "28000.50")
        amount: String,
        /// How often the amount is received
        #[arg(short, long, default_value = "monthly")]
        frequency: Frequency,
    },

    /// Remove an income source
    #[command(alias = "rm")]
    Remove {
        /// Source name or ID
        name: String,
    },

    /// Remove every income source
    Clear,

    /// Replace the whole income list
    Replace {
        /// Entries as name=amount or name=amount:frequency
        #[arg(required = true)]
        entries: Vec<String>,
    },
}

/// Handle an income command
pub fn handle_income_command(storage: &UserStorage, settings: &Settings, cmd: IncomeCommands) -> BudgetResult<()> {
    let service = IncomeService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::List => {
            let incomes = service.list()?;
            println!("{}", format_income_list(&incomes, symbol));
        }

        IncomeCommands::Set {
            name,
            amount,
            frequency,
        } => {
            let amount = Money::parse(&amount)
                .map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))?;

            let (income, created) = service.set(&name, amount, frequency)?;
            println!(
                "{} income: {} {} ({}, {} per month)",
                if created { "Added" } else { "Updated" },
                income.name,
                income.amount.format_with_symbol(symbol),
                income.frequency.label(),
                income.monthly_amount().format_with_symbol(symbol),
            );
        }

        IncomeCommands::Remove { name } => {
            let income = service.remove(&name)?;
            println!("Removed income: {}", income.name);
        }

        IncomeCommands::Clear => {
            let removed = service.clear()?;
            println!("Removed {} income source(s).", removed);
        }

        IncomeCommands::Replace { entries } => {
            let entries = entries
                .iter()
                .map(|e| IncomeEntry::parse(e))
                .collect::<BudgetResult<Vec<_>>>()?;

            let incomes = service.replace(entries)?;
            println!("Income replaced with {} source(s).", incomes.len());
            println!(
                "Total per month: {}",
                service.total_monthly()?.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}

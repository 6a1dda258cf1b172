//! Expense CLI commands
//!
//! Months are given as a comma list (`--months 3,9`) and must match the
//! frequency: four for quarterly, two for semi-annual, one for yearly.

use clap::Subcommand;

use crate::allocation::parse_months;
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Frequency, Money};
use crate::services::{ExpenseService, ExpenseUpdate, NewExpense};
use crate::storage::UserStorage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses grouped by category
    #[command(alias = "ls")]
    List,

    /// Add an expense
    Add {
        /// Expense name
        name: String,
        /// Amount per occurrence
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// How often the amount is charged
        #[arg(short, long, default_value = "monthly")]
        frequency: Frequency,
        /// Months the charge falls in, e.g. "3,9"; spread evenly when omitted
        #[arg(short, long)]
        months: Option<String>,
        /// Bank account the expense is paid from
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Show an expense and its month-by-month charges
    Show {
        /// Expense name or ID
        expense: String,
    },

    /// Edit an expense
    Edit {
        /// Expense name or ID
        expense: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// New frequency; clears the months unless --months is also given
        #[arg(short, long)]
        frequency: Option<Frequency>,
        /// New months, e.g. "3,9"
        #[arg(short, long, conflicts_with = "spread")]
        months: Option<String>,
        /// Drop the months and spread the charge evenly
        #[arg(long)]
        spread: bool,
        #[arg(short, long, conflicts_with = "no_account")]
        account: Option<String>,
        /// Remove the bank account
        #[arg(long)]
        no_account: bool,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense name or ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &UserStorage, settings: &Settings, cmd: ExpenseCommands) -> BudgetResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List => {
            let grouped = service.list_by_category()?;
            println!("{}", format_expense_list(&grouped, symbol));
        }

        ExpenseCommands::Add {
            name,
            amount,
            category,
            frequency,
            months,
            account,
        } => {
            let expense = service.create(NewExpense {
                name,
                category,
                amount: parse_amount(&amount)?,
                frequency,
                account,
                months: months.as_deref().map(parse_months).transpose()?.unwrap_or_default(),
            })?;

            println!("Added expense: {}", expense.name);
            println!("  Category:  {}", expense.category);
            println!(
                "  Amount:    {} {}",
                expense.amount.format_with_symbol(symbol),
                expense.frequency.label().to_lowercase()
            );
            println!("  Months:    {}", expense.schedule);
            println!("  Per month: {}", expense.monthly_amount().format_with_symbol(symbol));
            println!("  ID:        {}", expense.id);
        }

        ExpenseCommands::Show { expense } => {
            let expense = service.find(&expense)?;
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::Edit {
            expense,
            name,
            amount,
            category,
            frequency,
            months,
            spread,
            account,
            no_account,
        } => {
            let update = ExpenseUpdate {
                name,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                frequency,
                account: if no_account { Some(None) } else { account.map(Some) },
                months: months.as_deref().map(parse_months).transpose()?,
                spread,
            };

            if update.is_empty() {
                println!("No changes specified. Use --name, --amount, --category, --frequency, --months, --spread or --account.");
                return Ok(());
            }

            let updated = service.update(&expense, update)?;
            println!("Updated expense: {}", updated.name);
            println!("  Months:    {}", updated.schedule);
            println!("  Per month: {}", updated.monthly_amount().format_with_symbol(symbol));
        }

        ExpenseCommands::Delete { expense } => {
            let deleted = service.delete(&expense)?;
            println!("Deleted expense: {}", deleted.name);
        }
    }

    Ok(())
}

fn parse_amount(s: &str) -> BudgetResult<Money> {
    Money::parse(s).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use household_budget::cli::{
    handle_account_command, handle_audit_command, handle_category_command, handle_dashboard,
    handle_expense_command, handle_export_command, handle_income_command, handle_overview,
    handle_user_command, open_user_storage,
};
use household_budget::config::{paths::BudgetPaths, settings::Settings};
use household_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Household budget tracker",
    long_about = "Track a household's income and recurring expenses, and see how \
                  monthly, quarterly, semi-annual and yearly costs land across \
                  the months of a year."
)]
struct Cli {
    /// Browse a read-only demo household instead of your own data
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    User(household_budget::cli::UserCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(household_budget::cli::IncomeCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(household_budget::cli::ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(household_budget::cli::CategoryCommands),

    /// Bank account commands
    #[command(subcommand)]
    Account(household_budget::cli::AccountCommands),

    /// Monthly dashboard: income, expenses and what is left
    Dashboard {
        /// Number of top expenses to list
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Yearly overview, month by month per category
    Overview {
        /// Write the overview as CSV to this file
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Export data
    #[command(subcommand)]
    Export(household_budget::cli::ExportCommands),

    /// Show recent changes to your records
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Only entries for this kind of record (income, expense, ...)
        #[arg(short, long)]
        entity: Option<String>,
        /// Include field-level changes
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::User(cmd)) => {
            if cli.demo {
                anyhow::bail!("Demo mode has no user accounts. Drop --demo to log in.");
            }
            handle_user_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_income_command(&user_storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_expense_command(&user_storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_category_command(&user_storage, &settings, cmd)?;
        }
        Some(Commands::Account(cmd)) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_account_command(&user_storage, &settings, cmd)?;
        }
        Some(Commands::Dashboard { top }) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_dashboard(&user_storage, &settings, top)?;
        }
        Some(Commands::Overview { output }) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_overview(&user_storage, output.as_deref())?;
        }
        Some(Commands::Export(cmd)) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_export_command(&user_storage, cmd)?;
        }
        Some(Commands::Audit {
            limit,
            entity,
            verbose,
        }) => {
            let user_storage = open_user_storage(&storage, &settings, cli.demo)?;
            handle_audit_command(&user_storage, limit, entity.as_deref(), verbose)?;
        }
        Some(Commands::Config) => {
            println!("Household Budget Configuration");
            println!("==============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Users:            {}", storage.users.count()?);
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Session lifetime:    {} days", settings.session_ttl_days);
            println!("  Min password length: {}", settings.min_password_length);
            println!("  Top expenses shown:  {}", settings.top_expense_count);
        }
        None => {
            println!("budget - household budget tracker");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget --demo dashboard' to look around without an account.");
        }
    }

    Ok(())
}

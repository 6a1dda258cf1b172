//! Category CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_category_list;
use crate::error::BudgetResult;
use crate::models::category::DEFAULT_ICON;
use crate::services::CategoryService;
use crate::storage::UserStorage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories with how many expenses use each
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Icon name
        #[arg(short, long, default_value = DEFAULT_ICON)]
        icon: String,
    },

    /// Rename a category or change its icon
    Edit {
        /// Category name or ID
        category: String,
        /// New name (expenses follow the rename)
        #[arg(short, long)]
        name: Option<String>,
        /// New icon name
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Delete a category no expense uses
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &UserStorage, settings: &Settings, cmd: CategoryCommands) -> BudgetResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list_with_usage()?;
            println!("{}", format_category_list(&categories, &settings.currency_symbol));
        }

        CategoryCommands::Add { name, icon } => {
            let category = service.create(&name, &icon)?;
            println!("Created category: {} ({})", category.name, category.icon);
        }

        CategoryCommands::Edit {
            category,
            name,
            icon,
        } => {
            if name.is_none() && icon.is_none() {
                println!("No changes specified. Use --name or --icon.");
                return Ok(());
            }

            let (updated, moved) = service.update(&category, name.as_deref(), icon.as_deref())?;
            println!("Updated category: {} ({})", updated.name, updated.icon);
            if moved > 0 {
                println!("Moved {} expense(s) to '{}'.", moved, updated.name);
            }
        }

        CategoryCommands::Delete { category } => {
            let deleted = service.delete(&category)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer.

pub mod account;
pub mod audit;
pub mod category;
pub mod expense;
pub mod export;
pub mod income;
pub mod report;
pub mod user;

pub use account::{handle_account_command, AccountCommands};
pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_dashboard, handle_overview};
pub use user::{handle_user_command, ResetCommands, UserCommands};

use crate::config::Settings;
use crate::demo::demo_storage;
use crate::error::{BudgetError, BudgetResult};
use crate::services::auth::load_client_token;
use crate::services::AuthService;
use crate::storage::{Storage, UserStorage};

/// Open the records the current command works on
///
/// In demo mode that is the read-only demo household; otherwise the
/// logged-in user's records, which needs a valid session.
pub fn open_user_storage(storage: &Storage, settings: &Settings, demo: bool) -> BudgetResult<UserStorage> {
    if demo {
        log::debug!("Using the demo household");
        return demo_storage();
    }

    let token = load_client_token(storage.paths())?.ok_or_else(BudgetError::not_logged_in)?;
    let sessions = storage.open_sessions()?;
    let user = AuthService::new(storage, &sessions, settings).authenticate(&token)?;

    log::debug!("Opening records of {}", user.username);
    storage.user_storage(user.id)
}

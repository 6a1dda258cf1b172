//! User CLI commands
//!
//! Registration, login, session management and password resets. Passwords
//! are read from a hidden prompt unless given with `--password` (or
//! `BUDGET_PASSWORD`).

use clap::Subcommand;

use crate::config::Settings;
use crate::crypto::Password;
use crate::error::{BudgetError, BudgetResult};
use crate::models::user::UserValidationError;
use crate::services::auth::{clear_client_token, load_client_token, save_client_token};
use crate::services::AuthService;
use crate::storage::Storage;

/// User and session subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new user
    Register {
        /// Username (3-32 letters, digits, '_', '-' or '.')
        username: String,
        /// E-mail address (only a hash is stored)
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long, env = "BUDGET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in and remember the session on this machine
    Login {
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "BUDGET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Change your password; other sessions are logged out
    Passwd {
        /// Current password (prompted for when omitted)
        #[arg(long)]
        current: Option<String>,
        /// New password (prompted for when omitted)
        #[arg(long = "new")]
        new_password: Option<String>,
    },

    /// Set the e-mail address used for password resets
    Email {
        /// New address (only a hash is stored)
        #[arg(required_unless_present = "remove")]
        address: Option<String>,
        /// Remove the address on file
        #[arg(long, conflicts_with = "address")]
        remove: bool,
    },

    /// Reset a forgotten password
    #[command(subcommand)]
    ResetPassword(ResetCommands),
}

/// Password reset steps
#[derive(Subcommand)]
pub enum ResetCommands {
    /// Issue a reset code for the account with this e-mail address
    Request {
        email: String,
    },

    /// Choose a new password using a reset code
    Confirm {
        /// Reset code from `reset-password request`
        code: String,
        /// New password (prompted for when omitted)
        #[arg(long, env = "BUDGET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, settings: &Settings, cmd: UserCommands) -> BudgetResult<()> {
    let sessions = storage.open_sessions()?;
    let auth = AuthService::new(storage, &sessions, settings);
    let paths = storage.paths();

    match cmd {
        UserCommands::Register {
            username,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => Password::new(p),
                None => prompt_new_password(settings.min_password_length)?,
            };

            let user = auth.register(&username, &password, email.as_deref())?;
            println!("Registered user: {}", user.username);
            println!("Run 'budget login {}' to start.", user.username);
        }

        UserCommands::Login { username, password } => {
            let password = match password {
                Some(p) => Password::new(p),
                None => prompt_password("Password: ")?,
            };

            let (user, token) = auth.login(&username, &password)?;
            save_client_token(paths, &token)?;
            println!("Logged in as {}", user.username);
        }

        UserCommands::Logout => {
            match load_client_token(paths)? {
                Some(token) => {
                    auth.logout(&token)?;
                    clear_client_token(paths)?;
                    println!("Logged out.");
                }
                None => println!("Not logged in."),
            }
        }

        UserCommands::Whoami => {
            let token = load_client_token(paths)?.ok_or_else(BudgetError::not_logged_in)?;
            let user = auth.authenticate(&token)?;

            println!("{}", user.username);
            println!("  ID:          {}", user.id);
            println!("  Registered:  {}", user.created_at.format("%Y-%m-%d"));
            if let Some(last_login) = user.last_login {
                println!("  Last login:  {}", last_login.format("%Y-%m-%d %H:%M"));
            }
            println!("  E-mail:      {}", if user.has_email() { "on file" } else { "none" });
        }

        UserCommands::Passwd {
            current,
            new_password,
        } => {
            let token = load_client_token(paths)?.ok_or_else(BudgetError::not_logged_in)?;

            let current = match current {
                Some(p) => Password::new(p),
                None => prompt_password("Current password: ")?,
            };
            let new_password = match new_password {
                Some(p) => Password::new(p),
                None => prompt_new_password(settings.min_password_length)?,
            };

            let revoked = auth.change_password(&token, &current, &new_password)?;
            println!("Password changed.");
            if revoked > 0 {
                println!("Logged out {} other session(s).", revoked);
            }
        }

        UserCommands::Email { address, remove } => {
            let token = load_client_token(paths)?.ok_or_else(BudgetError::not_logged_in)?;
            let address = if remove { None } else { address };

            let user = auth.update_email(&token, address.as_deref())?;
            if user.has_email() {
                println!("E-mail address saved for {}.", user.username);
            } else {
                println!("E-mail address removed for {}.", user.username);
            }
        }

        UserCommands::ResetPassword(ResetCommands::Request { email }) => {
            println!("If an account uses that address, a reset code has been issued.");
            if let Some((user, code)) = auth.request_password_reset(&email)? {
                println!();
                println!("Reset code for {} (valid {} minutes):", user.username, settings.reset_ttl_minutes);
                println!("{}", code.as_str());
                println!();
                println!("Run 'budget reset-password confirm <code>' to choose a new password.");
            }
        }

        UserCommands::ResetPassword(ResetCommands::Confirm { code, password }) => {
            let password = match password {
                Some(p) => Password::new(p),
                None => prompt_new_password(settings.min_password_length)?,
            };

            let user = auth.reset_password(&code, &password)?;
            clear_client_token(paths)?;
            println!("Password reset for {}. Run 'budget login {}' to continue.", user.username, user.username);
        }
    }

    Ok(())
}

/// Prompt for a new password with confirmation
fn prompt_new_password(min_length: usize) -> BudgetResult<Password> {
    let first = prompt_password("New password: ")?;
    if first.chars().count() < min_length {
        return Err(BudgetError::Validation(
            UserValidationError::PasswordTooShort { min: min_length }.to_string(),
        ));
    }

    let second = prompt_password("Confirm password: ")?;
    if *first != *second {
        return Err(BudgetError::Validation(
            UserValidationError::PasswordMismatch.to_string(),
        ));
    }

    Ok(first)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> BudgetResult<Password> {
    rpassword::prompt_password(prompt)
        .map(Password::new)
        .map_err(|e| BudgetError::Auth(format!("Failed to read password: {}", e)))
}

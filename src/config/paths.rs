//! Path management for the household budget
//!
//! ## Path Resolution Order
//!
//! 1. `HOUSEHOLD_BUDGET_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory from `directories::ProjectDirs`
//!    (`~/.config/household-budget` on Linux)
//!
//! ## Layout
//!
//! ```text
//! <base>/config.json          settings
//! <base>/users.json           registered users
//! <base>/sessions.json        active sessions (token hashes only)
//! <base>/session              token of the session on this machine
//! <base>/password_resets.json outstanding reset codes (hashes only)
//! <base>/data/<user-id>/      one directory of records per user
//! ```

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::error::BudgetError;
use crate::models::UserId;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "HOUSEHOLD_BUDGET_DATA_DIR";

/// Manages all paths used by the application
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgetError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding one subdirectory per user
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    pub fn sessions_file(&self) -> PathBuf {
        self.base_dir.join("sessions.json")
    }

    pub fn password_resets_file(&self) -> PathBuf {
        self.base_dir.join("password_resets.json")
    }

    /// File holding the raw token of the session logged in on this machine
    pub fn current_session_file(&self) -> PathBuf {
        self.base_dir.join("session")
    }

    /// Get the record paths for one user
    pub fn user(&self, user_id: &UserId) -> UserPaths {
        UserPaths {
            dir: self.data_dir().join(user_id.as_uuid().to_string()),
        }
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether settings have been written yet
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Per-user record files
#[derive(Debug, Clone)]
pub struct UserPaths {
    dir: PathBuf,
}

impl UserPaths {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn income_file(&self) -> PathBuf {
        self.dir.join("income.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.dir.join("expenses.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.dir.join("categories.json")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.dir.join("accounts.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.dir.join("audit.log")
    }

    pub fn ensure_directory(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create user directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgetError> {
    ProjectDirs::from("", "", "household-budget")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BudgetError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.users_file(), temp_dir.path().join("users.json"));
        assert_eq!(paths.current_session_file(), temp_dir.path().join("session"));
    }

    #[test]
    fn test_user_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let user_id = UserId::new();
        let user = paths.user(&user_id);

        let dir = temp_dir.path().join("data").join(user_id.as_uuid().to_string());
        assert_eq!(user.dir(), dir.as_path());
        assert_eq!(user.expenses_file(), dir.join("expenses.json"));
        assert_eq!(user.audit_log(), dir.join("audit.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        std::env::set_var(DATA_DIR_ENV, temp_dir.path());

        let paths = BudgetPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        std::env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}

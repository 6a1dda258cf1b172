//! Password reset codes
//!
//! Kept in `password_resets.json`, keyed by the SHA-256 hash of the code.
//! A user has at most one usable code: issuing a new one marks the older
//! ones used.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::PasswordReset;

use super::file_io::{read_json, restrict_permissions, write_json_atomic};

/// File-backed store of password reset codes
pub struct PasswordResetStore {
    path: PathBuf,
    resets: RwLock<HashMap<String, PasswordReset>>,
}

impl PasswordResetStore {
    /// Open the store, loading any codes already on disk
    pub fn open(path: PathBuf) -> Result<Self, BudgetError> {
        let resets: HashMap<String, PasswordReset> = read_json(&path)?;
        Ok(Self {
            path,
            resets: RwLock::new(resets),
        })
    }

    /// Store a new code, retiring every other code of the same user
    ///
    /// Codes that can no longer be used are dropped from the file.
    pub fn issue(&self, code_hash: &str, reset: PasswordReset) -> Result<(), BudgetError> {
        {
            let mut resets = self.write()?;
            let now = Utc::now();
            for existing in resets.values_mut() {
                if existing.user_id == reset.user_id {
                    existing.used = true;
                }
            }
            resets.retain(|_, r| r.is_valid_at(now));
            resets.insert(code_hash.to_string(), reset);
        }
        self.persist()
    }

    /// The reset behind a code, if it is unused and not expired at `now`
    pub fn get_valid(
        &self,
        code_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PasswordReset>, BudgetError> {
        let resets = self
            .resets
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(resets
            .get(code_hash)
            .filter(|r| r.is_valid_at(now))
            .cloned())
    }

    /// Mark a code used, returning whether it existed
    pub fn mark_used(&self, code_hash: &str) -> Result<bool, BudgetError> {
        let found = match self.write()?.get_mut(code_hash) {
            Some(reset) => {
                reset.used = true;
                true
            }
            None => false,
        };
        if found {
            self.persist()?;
        }
        Ok(found)
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, PasswordReset>>, BudgetError> {
        self.resets
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn persist(&self) -> Result<(), BudgetError> {
        let resets = self
            .resets
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*resets)?;
        restrict_permissions(&self.path)
    }
}

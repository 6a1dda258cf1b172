//! User repository
//!
//! All registered users live in one `users.json` at the base directory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{User, UserId};

use super::file_io::{read_json, restrict_permissions, write_json_atomic};

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let users: Vec<User> = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for user in users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk; the file holds password hashes so it is owner-only
    pub fn save(&self) -> Result<(), BudgetError> {
        let users = self.get_all()?;
        write_json_atomic(&self.path, &users)?;
        restrict_permissions(&self.path)
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All users ordered by registration time
    pub fn get_all(&self) -> Result<Vec<User>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<User> = data.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    /// Find a user by username (case-insensitive)
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let wanted = username.trim().to_lowercase();
        Ok(data
            .values()
            .find(|u| u.username.to_lowercase() == wanted)
            .cloned())
    }

    /// Find a user by e-mail hash
    pub fn get_by_email_hash(&self, email_hash: &str) -> Result<Option<User>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|u| u.email_hash.as_deref() == Some(email_hash))
            .cloned())
    }

    /// Insert a new user, failing if the username is taken
    pub fn insert(&self, user: User) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let wanted = user.username.to_lowercase();
        if data.values().any(|u| u.username.to_lowercase() == wanted) {
            return Err(BudgetError::Duplicate {
                entity_type: "User",
                identifier: user.username,
            });
        }

        data.insert(user.id, user);
        Ok(())
    }

    /// Replace an existing user
    pub fn update(&self, user: User) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if !data.contains_key(&user.id) {
            return Err(BudgetError::NotFound {
                entity_type: "User",
                identifier: user.username,
            });
        }

        data.insert(user.id, user);
        Ok(())
    }

    /// Remove a user, returning it if it existed
    pub fn remove(&self, id: UserId) -> Result<Option<User>, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

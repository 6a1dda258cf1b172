//! Generic JSON-backed record repository
//!
//! Each of a user's record kinds (income, expenses, categories, accounts)
//! lives in its own JSON file as a plain array. The whole file is held in
//! memory behind an `RwLock` and written back atomically on `save`.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Account, AccountId, Category, CategoryId, Expense, ExpenseId, Income, IncomeId};

use super::file_io::{read_json, write_json_atomic};

/// A record a [`Repository`] can hold
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + std::fmt::Display;

    fn id(&self) -> Self::Id;

    /// Label used for name lookups and listings
    fn name(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    /// Whether a user-typed key (ID or short ID) refers to this record
    fn matches_key(&self, key: &str) -> bool;
}

macro_rules! impl_record {
    ($ty:ty, $id:ty) => {
        impl Record for $ty {
            type Id = $id;

            fn id(&self) -> $id {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }

            fn matches_key(&self, key: &str) -> bool {
                self.id.matches_key(key)
            }
        }
    };
}

impl_record!(Income, IncomeId);
impl_record!(Expense, ExpenseId);
impl_record!(Category, CategoryId);
impl_record!(Account, AccountId);

/// In-memory table of records backed by one JSON file
pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

pub type IncomeRepository = Repository<Income>;
pub type ExpenseRepository = Repository<Expense>;
pub type CategoryRepository = Repository<Category>;
pub type AccountRepository = Repository<Account>;

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load records from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), BudgetError> {
        let records: Vec<T> = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for record in records {
            data.insert(record.id(), record);
        }

        Ok(())
    }

    /// Save records to disk in creation order
    pub fn save(&self) -> Result<(), BudgetError> {
        let records = self.get_all()?;
        write_json_atomic(&self.path, &records)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All records, oldest first (ties broken by name)
    pub fn get_all(&self) -> Result<Vec<T>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut records: Vec<T> = data.values().cloned().collect();
        records.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(records)
    }

    /// Find a record by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<T>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|r| r.name().to_lowercase() == name_lower)
            .cloned())
    }

    /// Find every record whose ID matches a user-typed key
    pub fn find_by_key(&self, key: &str) -> Result<Vec<T>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().filter(|r| r.matches_key(key)).cloned().collect())
    }

    /// Whether another record already uses this name (case-insensitive)
    pub fn name_exists(&self, name: &str, exclude_id: Option<T::Id>) -> Result<bool, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .any(|r| r.name().to_lowercase() == name_lower && Some(r.id()) != exclude_id))
    }

    /// Insert or update a record
    pub fn upsert(&self, record: T) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> Result<Option<T>, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    /// Remove every record, returning what was removed
    pub fn clear(&self) -> Result<Vec<T>, BudgetError> {
        let removed = self.get_all()?;
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

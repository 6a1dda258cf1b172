//! Storage layer
//!
//! JSON file storage with atomic writes. `Storage` owns installation-wide
//! data (users); `UserStorage` owns one user's records and audit log. Every
//! read and write a service performs on a user's records goes through that
//! user's `UserStorage`, which keeps users' data apart.

pub mod file_io;
pub mod init;
pub mod repository;
pub mod resets;
pub mod sessions;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_user_storage;
pub use repository::{
    AccountRepository, CategoryRepository, ExpenseRepository, IncomeRepository, Record, Repository,
};
pub use resets::PasswordResetStore;
pub use sessions::{FileSessionStore, MemorySessionStore, SessionStore};
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::{BudgetPaths, UserPaths};
use crate::error::{BudgetError, BudgetResult};
use crate::models::UserId;

/// Installation-wide storage
pub struct Storage {
    paths: BudgetPaths,
    pub users: UserRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BudgetError> {
        self.users.load()
    }

    /// Open the session store that lives next to the user file
    pub fn open_sessions(&self) -> Result<FileSessionStore, BudgetError> {
        FileSessionStore::open(self.paths.sessions_file())
    }

    /// Open the store of outstanding password reset codes
    pub fn open_password_resets(&self) -> Result<PasswordResetStore, BudgetError> {
        PasswordResetStore::open(self.paths.password_resets_file())
    }

    /// Open and load one user's records
    pub fn user_storage(&self, user_id: UserId) -> Result<UserStorage, BudgetError> {
        let storage = UserStorage::new(user_id, self.paths.user(&user_id));
        storage.load_all()?;
        Ok(storage)
    }
}

/// One user's records
pub struct UserStorage {
    user_id: UserId,
    paths: Option<UserPaths>,
    audit: Option<AuditLogger>,
    pub income: IncomeRepository,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    pub accounts: AccountRepository,
}

impl UserStorage {
    /// Storage backed by a user's data directory
    pub fn new(user_id: UserId, paths: UserPaths) -> Self {
        Self {
            user_id,
            audit: Some(AuditLogger::new(paths.audit_log())),
            income: IncomeRepository::new(paths.income_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            accounts: AccountRepository::new(paths.accounts_file()),
            paths: Some(paths),
        }
    }

    /// Storage that exists only in memory and refuses every mutation
    pub fn read_only(user_id: UserId) -> Self {
        Self {
            user_id,
            paths: None,
            audit: None,
            income: IncomeRepository::new(Default::default()),
            expenses: ExpenseRepository::new(Default::default()),
            categories: CategoryRepository::new(Default::default()),
            accounts: AccountRepository::new(Default::default()),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn paths(&self) -> Option<&UserPaths> {
        self.paths.as_ref()
    }

    pub fn is_read_only(&self) -> bool {
        self.paths.is_none()
    }

    /// Fail with `ReadOnly` if this storage cannot be written
    pub fn ensure_writable(&self, action: &str) -> BudgetResult<()> {
        if self.is_read_only() {
            return Err(BudgetError::ReadOnly(format!("cannot {}", action)));
        }
        Ok(())
    }

    /// Load all records from disk (no-op for read-only storage)
    pub fn load_all(&self) -> BudgetResult<()> {
        if self.is_read_only() {
            return Ok(());
        }
        self.income.load()?;
        self.expenses.load()?;
        self.categories.load()?;
        self.accounts.load()?;
        Ok(())
    }

    /// Save all records to disk
    pub fn save_all(&self) -> BudgetResult<()> {
        self.ensure_writable("save changes")?;
        self.income.save()?;
        self.expenses.save()?;
        self.categories.save()?;
        self.accounts.save()?;
        Ok(())
    }

    /// The audit log, `None` for read-only storage
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.log(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Log an update with a diff of the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> BudgetResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.log(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.log(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Append an entry to the audit log
    pub fn log(&self, entry: AuditEntry) -> BudgetResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }

    /// Append several entries with one write
    pub fn log_batch(&self, entries: &[AuditEntry]) -> BudgetResult<()> {
        match &self.audit {
            Some(logger) => logger.log_batch(entries),
            None => Ok(()),
        }
    }
}

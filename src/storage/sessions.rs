//! Session storage
//!
//! Sessions are keyed by the SHA-256 hash of their token. The auth service
//! talks to a [`SessionStore`] so the backing mechanism can be swapped: a
//! JSON file for the CLI, an in-memory map for tests.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Session, UserId};

use super::file_io::{read_json, restrict_permissions, write_json_atomic};

/// Key-value store of active sessions
pub trait SessionStore {
    /// Look up a session by token hash
    fn get(&self, token_hash: &str) -> Result<Option<Session>, BudgetError>;

    /// Store or replace a session
    fn set(&self, token_hash: &str, session: Session) -> Result<(), BudgetError>;

    /// Remove a session, returning whether it existed
    fn delete(&self, token_hash: &str) -> Result<bool, BudgetError>;

    /// Remove every session of a user except `keep`, returning how many went
    fn delete_for_user(&self, user_id: UserId, keep: Option<&str>) -> Result<usize, BudgetError>;

    /// Remove sessions expired at `now`, returning how many went
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, BudgetError>;
}

/// Sessions held in memory only
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_write<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Session>) -> R,
    ) -> Result<R, BudgetError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(f(&mut sessions))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, token_hash: &str) -> Result<Option<Session>, BudgetError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(sessions.get(token_hash).cloned())
    }

    fn set(&self, token_hash: &str, session: Session) -> Result<(), BudgetError> {
        self.with_write(|s| {
            s.insert(token_hash.to_string(), session);
        })
    }

    fn delete(&self, token_hash: &str) -> Result<bool, BudgetError> {
        self.with_write(|s| s.remove(token_hash).is_some())
    }

    fn delete_for_user(&self, user_id: UserId, keep: Option<&str>) -> Result<usize, BudgetError> {
        self.with_write(|s| {
            let before = s.len();
            s.retain(|hash, session| session.user_id != user_id || Some(hash.as_str()) == keep);
            before - s.len()
        })
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, BudgetError> {
        self.with_write(|s| {
            let before = s.len();
            s.retain(|_, session| !session.is_expired_at(now));
            before - s.len()
        })
    }
}

/// Sessions persisted to `sessions.json`
///
/// Every mutation writes the file back immediately.
pub struct FileSessionStore {
    path: PathBuf,
    inner: MemorySessionStore,
}

impl FileSessionStore {
    /// Open the store, loading any sessions already on disk
    pub fn open(path: PathBuf) -> Result<Self, BudgetError> {
        let sessions: HashMap<String, Session> = read_json(&path)?;
        Ok(Self {
            path,
            inner: MemorySessionStore {
                sessions: RwLock::new(sessions),
            },
        })
    }

    fn persist(&self) -> Result<(), BudgetError> {
        let sessions = self
            .inner
            .sessions
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*sessions)?;
        restrict_permissions(&self.path)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, token_hash: &str) -> Result<Option<Session>, BudgetError> {
        self.inner.get(token_hash)
    }

    fn set(&self, token_hash: &str, session: Session) -> Result<(), BudgetError> {
        self.inner.set(token_hash, session)?;
        self.persist()
    }

    fn delete(&self, token_hash: &str) -> Result<bool, BudgetError> {
        let removed = self.inner.delete(token_hash)?;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn delete_for_user(&self, user_id: UserId, keep: Option<&str>) -> Result<usize, BudgetError> {
        let removed = self.inner.delete_for_user(user_id, keep)?;
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, BudgetError> {
        let removed = self.inner.purge_expired(now)?;
        if removed > 0 {
            log::debug!("Purged {} expired session(s)", removed);
            self.persist()?;
        }
        Ok(removed)
    }
}

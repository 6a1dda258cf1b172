//! Storage initialization
//!
//! First-run setup for a newly registered user.

use crate::error::BudgetError;
use crate::models::Category;

use super::UserStorage;

/// Prepare a fresh user's data directory
///
/// Creates the directory and, if the user has no categories yet, the
/// default category set.
pub fn initialize_user_storage(storage: &UserStorage) -> Result<(), BudgetError> {
    storage.ensure_writable("initialize user data")?;

    if let Some(paths) = storage.paths() {
        paths.ensure_directory()?;
    }

    if storage.categories.count()? == 0 {
        for category in Category::defaults() {
            storage.categories.upsert(category)?;
        }
        log::debug!("Created default categories for {}", storage.user_id());
    }

    storage.save_all()
}

/// Whether a user's data directory still needs initialization
pub fn needs_initialization(storage: &UserStorage) -> bool {
    storage
        .paths()
        .is_some_and(|paths| !paths.categories_file().exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use crate::models::UserId;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(BudgetPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user_storage = storage.user_storage(UserId::new()).unwrap();

        assert!(needs_initialization(&user_storage));
        initialize_user_storage(&user_storage).unwrap();
        assert!(!needs_initialization(&user_storage));

        let categories = user_storage.categories.get_all().unwrap();
        assert_eq!(categories.len(), 9);
        assert!(categories.iter().any(|c| c.name == "Bolig" && c.icon == "house"));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(BudgetPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user_storage = storage.user_storage(UserId::new()).unwrap();

        initialize_user_storage(&user_storage).unwrap();
        initialize_user_storage(&user_storage).unwrap();
        assert_eq!(user_storage.categories.count().unwrap(), 9);
    }

    #[test]
    fn test_read_only_storage_is_not_initialized() {
        let storage = UserStorage::read_only(UserId::new());
        assert!(initialize_user_storage(&storage).is_err());
        assert!(!needs_initialization(&storage));
    }
}

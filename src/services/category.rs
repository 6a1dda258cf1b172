//! Category service
//!
//! Provides business logic for the per-user category registry. Expenses
//! refer to categories by name, so a rename is cascaded to every expense
//! that carries the old name and a category in use cannot be deleted.

use chrono::Utc;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Money};
use crate::storage::UserStorage;

use super::resolve;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a UserStorage,
}

/// A category with the expenses filed under it
#[derive(Debug, Clone)]
pub struct CategoryUsage {
    pub category: Category,
    pub expense_count: usize,
    pub monthly_total: Money,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a UserStorage) -> Self {
        Self { storage }
    }

    /// Find a category by name or ID
    pub fn find(&self, identifier: &str) -> BudgetResult<Category> {
        resolve(&self.storage.categories, identifier, |id| {
            BudgetError::category_not_found(id)
        })
    }

    /// All categories, alphabetically
    pub fn list(&self) -> BudgetResult<Vec<Category>> {
        let mut categories = self.storage.categories.get_all()?;
        categories.sort_by_key(|c| c.name.to_lowercase());
        Ok(categories)
    }

    /// All categories with how many expenses use each
    pub fn list_with_usage(&self) -> BudgetResult<Vec<CategoryUsage>> {
        let expenses = self.storage.expenses.get_all()?;

        Ok(self
            .list()?
            .into_iter()
            .map(|category| {
                let used: Vec<_> = expenses
                    .iter()
                    .filter(|e| e.category == category.name)
                    .collect();
                CategoryUsage {
                    expense_count: used.len(),
                    monthly_total: used.iter().map(|e| e.monthly_amount()).sum(),
                    category,
                }
            })
            .collect())
    }

    /// Create a new category
    pub fn create(&self, name: &str, icon: &str) -> BudgetResult<Category> {
        self.storage.ensure_writable("add categories")?;

        let name = name.trim();
        if self.storage.categories.name_exists(name, None)? {
            return Err(BudgetError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name, icon.trim());
        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Rename a category and/or change its icon
    ///
    /// Returns the updated category and the number of expenses moved to the
    /// new name.
    pub fn update(
        &self,
        identifier: &str,
        name: Option<&str>,
        icon: Option<&str>,
    ) -> BudgetResult<(Category, usize)> {
        self.storage.ensure_writable("edit categories")?;

        let mut category = self.find(identifier)?;
        let before = category.clone();

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if self.storage.categories.name_exists(new_name, Some(category.id))? {
                return Err(BudgetError::Duplicate {
                    entity_type: "Category",
                    identifier: new_name.to_string(),
                });
            }
            category.name = new_name.to_string();
        }
        if let Some(icon) = icon {
            category.icon = icon.trim().to_string();
        }
        category.updated_at = Utc::now();

        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        let moved = if before.name != category.name {
            self.rename_in_expenses(&before.name, &category.name)?
        } else {
            0
        };

        Ok((category, moved))
    }

    /// Delete a category that no expense uses
    pub fn delete(&self, identifier: &str) -> BudgetResult<Category> {
        self.storage.ensure_writable("delete categories")?;

        let category = self.find(identifier)?;
        let usage = self
            .storage
            .expenses
            .get_all()?
            .iter()
            .filter(|e| e.category == category.name)
            .count();
        if usage > 0 {
            return Err(BudgetError::InUse {
                entity_type: "Category",
                identifier: category.name,
                usage,
            });
        }

        self.storage.categories.delete(category.id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    fn rename_in_expenses(&self, old_name: &str, new_name: &str) -> BudgetResult<usize> {
        let mut audit = Vec::new();
        for expense in self.storage.expenses.get_all()? {
            if expense.category != old_name {
                continue;
            }
            let mut updated = expense.clone();
            updated.category = new_name.to_string();
            updated.updated_at = Utc::now();
            self.storage.expenses.upsert(updated.clone())?;

            audit.push(AuditEntry::update(
                EntityType::Expense,
                updated.id.to_string(),
                Some(updated.name.clone()),
                &expense,
                &updated,
                Some(format!("category: \"{}\" -> \"{}\"", old_name, new_name)),
            ));
        }

        if !audit.is_empty() {
            self.storage.expenses.save()?;
            self.storage.log_batch(&audit)?;
        }

        log::debug!("Moved {} expense(s) from '{}' to '{}'", audit.len(), old_name, new_name);
        Ok(audit.len())
    }
}

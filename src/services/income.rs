//! Income service
//!
//! Income sources are keyed by name within a user's household. A source can
//! be set (upserted), removed, or the whole list replaced in one go.

use std::collections::HashSet;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Frequency, Income, Money};
use crate::storage::UserStorage;

use super::resolve;

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a UserStorage,
}

/// One line of a wholesale income replacement
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeEntry {
    pub name: String,
    pub amount: Money,
    pub frequency: Frequency,
}

impl IncomeEntry {
    /// Parse `name=amount` or `name=amount:frequency`
    pub fn parse(s: &str) -> BudgetResult<Self> {
        let (name, rest) = s.split_once('=').ok_or_else(|| {
            BudgetError::Validation(format!(
                "Invalid income entry '{}': expected name=amount[:frequency]",
                s
            ))
        })?;

        let (amount, frequency) = match rest.rsplit_once(':') {
            Some((amount, freq)) => (
                amount,
                freq.parse::<Frequency>()
                    .map_err(|e| BudgetError::Validation(e.to_string()))?,
            ),
            None => (rest, Frequency::Monthly),
        };

        let amount = Money::parse(amount)
            .map_err(|e| BudgetError::Validation(format!("Invalid amount '{}': {}", amount, e)))?;

        Ok(Self {
            name: name.trim().to_string(),
            amount,
            frequency,
        })
    }
}

impl<'a> IncomeService<'a> {
    /// Create a new income service
    pub fn new(storage: &'a UserStorage) -> Self {
        Self { storage }
    }

    /// All income sources in the order they were added
    pub fn list(&self) -> BudgetResult<Vec<Income>> {
        self.storage.income.get_all()
    }

    /// Find an income source by name or ID
    pub fn find(&self, identifier: &str) -> BudgetResult<Income> {
        resolve(&self.storage.income, identifier, |id| {
            BudgetError::income_not_found(id)
        })
    }

    /// Total monthly-equivalent income
    pub fn total_monthly(&self) -> BudgetResult<Money> {
        Ok(self.list()?.iter().map(Income::monthly_amount).sum())
    }

    /// Create or update the income source with this name
    ///
    /// Returns the stored source and whether it was newly created.
    pub fn set(&self, name: &str, amount: Money, frequency: Frequency) -> BudgetResult<(Income, bool)> {
        self.storage.ensure_writable("change income")?;

        let name = name.trim();
        match self.storage.income.get_by_name(name)? {
            Some(existing) => {
                let before = existing.clone();
                let mut income = existing;
                income.set_amount(amount, frequency);
                income
                    .validate()
                    .map_err(|e| BudgetError::Validation(e.to_string()))?;

                self.storage.income.upsert(income.clone())?;
                self.storage.income.save()?;

                self.storage.log_update(
                    EntityType::Income,
                    income.id.to_string(),
                    Some(income.name.clone()),
                    &before,
                    &income,
                )?;

                Ok((income, false))
            }
            None => {
                let income = Income::new(name, amount, frequency);
                income
                    .validate()
                    .map_err(|e| BudgetError::Validation(e.to_string()))?;

                self.storage.income.upsert(income.clone())?;
                self.storage.income.save()?;

                self.storage.log_create(
                    EntityType::Income,
                    income.id.to_string(),
                    Some(income.name.clone()),
                    &income,
                )?;

                Ok((income, true))
            }
        }
    }

    /// Remove one income source
    pub fn remove(&self, identifier: &str) -> BudgetResult<Income> {
        self.storage.ensure_writable("remove income")?;

        let income = self.find(identifier)?;
        self.storage.income.delete(income.id)?;
        self.storage.income.save()?;

        self.storage.log_delete(
            EntityType::Income,
            income.id.to_string(),
            Some(income.name.clone()),
            &income,
        )?;

        Ok(income)
    }

    /// Remove every income source, returning how many were removed
    pub fn clear(&self) -> BudgetResult<usize> {
        self.storage.ensure_writable("clear income")?;

        let removed = self.storage.income.clear()?;
        self.storage.income.save()?;

        let entries: Vec<AuditEntry> = removed
            .iter()
            .map(|income| {
                AuditEntry::delete(
                    EntityType::Income,
                    income.id.to_string(),
                    Some(income.name.clone()),
                    income,
                )
            })
            .collect();
        self.storage.log_batch(&entries)?;

        Ok(removed.len())
    }

    /// Replace the whole income list
    ///
    /// The new list is validated in full before anything is touched, so a
    /// bad entry leaves the stored list unchanged.
    pub fn replace(&self, entries: Vec<IncomeEntry>) -> BudgetResult<Vec<Income>> {
        self.storage.ensure_writable("replace income")?;

        let mut seen = HashSet::new();
        let mut incomes = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(BudgetError::Duplicate {
                    entity_type: "Income",
                    identifier: entry.name,
                });
            }

            let income = Income::new(entry.name, entry.amount, entry.frequency);
            income
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))?;
            incomes.push(income);
        }

        let removed = self.storage.income.clear()?;
        for income in &incomes {
            self.storage.income.upsert(income.clone())?;
        }
        self.storage.income.save()?;

        let mut audit: Vec<AuditEntry> = removed
            .iter()
            .map(|income| {
                AuditEntry::delete(
                    EntityType::Income,
                    income.id.to_string(),
                    Some(income.name.clone()),
                    income,
                )
            })
            .collect();
        audit.extend(incomes.iter().map(|income| {
            AuditEntry::create(
                EntityType::Income,
                income.id.to_string(),
                Some(income.name.clone()),
                income,
            )
        }));
        self.storage.log_batch(&audit)?;

        log::debug!(
            "Replaced {} income source(s) with {}",
            removed.len(),
            incomes.len()
        );

        Ok(incomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::UserId;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, UserStorage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let user_storage = storage.user_storage(UserId::new()).unwrap();
        (temp_dir, user_storage)
    }

    #[test]
    fn test_set_creates_then_updates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let (income, created) = service
            .set("Person 1", Money::from_units(28000), Frequency::Monthly)
            .unwrap();
        assert!(created);

        let (updated, created) = service
            .set("person 1", Money::from_units(30000), Frequency::Monthly)
            .unwrap();
        assert!(!created);
        assert_eq!(updated.id, income.id);
        assert_eq!(updated.name, "Person 1");
        assert_eq!(service.list().unwrap().len(), 1);
        assert_eq!(service.total_monthly().unwrap(), Money::from_units(30000));
    }

    #[test]
    fn test_negative_income_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let err = service
            .set("Person 1", Money::from_cents(-1), Frequency::Monthly)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service.set("A", Money::from_units(100), Frequency::Monthly).unwrap();
        service.set("B", Money::from_units(200), Frequency::Monthly).unwrap();

        assert_eq!(service.remove("a").unwrap().name, "A");
        assert!(service.remove("a").unwrap_err().is_not_found());
        assert_eq!(service.clear().unwrap(), 1);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service.set("Old", Money::from_units(100), Frequency::Monthly).unwrap();

        let entries = vec![
            IncomeEntry::parse("Person 1=28000").unwrap(),
            IncomeEntry::parse("Bonus=30000:semi-annual").unwrap(),
        ];
        service.replace(entries).unwrap();

        let names: Vec<String> = service.list().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Person 1".to_string()));
        assert!(!names.contains(&"Old".to_string()));
        assert_eq!(service.total_monthly().unwrap(), Money::from_units(33000));
    }

    #[test]
    fn test_replace_rejects_bad_list_without_changes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service.set("Old", Money::from_units(100), Frequency::Monthly).unwrap();

        let entries = vec![
            IncomeEntry::parse("A=1").unwrap(),
            IncomeEntry::parse("a=2").unwrap(),
        ];
        assert!(matches!(
            service.replace(entries),
            Err(BudgetError::Duplicate { .. })
        ));
        assert_eq!(service.list().unwrap()[0].name, "Old");
    }

    #[test]
    fn test_parse_entry() {
        let entry = IncomeEntry::parse("Bonus=30000.50:semi-annual").unwrap();
        assert_eq!(entry.name, "Bonus");
        assert_eq!(entry.amount, Money::from_cents(3_000_050));
        assert_eq!(entry.frequency, Frequency::SemiAnnual);

        assert!(IncomeEntry::parse("no-equals").is_err());
        assert!(IncomeEntry::parse("A=abc").is_err());
        assert!(IncomeEntry::parse("A=100:weekly").is_err());
    }

    #[test]
    fn test_mutations_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service.set("A", Money::from_units(100), Frequency::Monthly).unwrap();
        service.set("A", Money::from_units(150), Frequency::Monthly).unwrap();
        service.clear().unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_read_only_storage_refuses_changes() {
        let storage = UserStorage::read_only(UserId::new());
        let service = IncomeService::new(&storage);
        assert!(matches!(
            service.set("A", Money::from_units(1), Frequency::Monthly),
            Err(BudgetError::ReadOnly(_))
        ));
    }
}

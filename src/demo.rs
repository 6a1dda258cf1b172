//! Demo household
//!
//! A fixed, typical Danish household budget that can be browsed without an
//! account. It lives in read-only in-memory storage, so every mutation
//! attempted in demo mode fails with `BudgetError::ReadOnly`.

use uuid::Uuid;

use crate::error::BudgetResult;
use crate::models::{Category, Expense, Frequency, Income, Money, UserId};
use crate::storage::UserStorage;

/// (source, amount, frequency)
pub const DEMO_INCOME: [(&str, i64, Frequency); 3] = [
    ("Person 1", 28000, Frequency::Monthly),
    ("Person 2", 22000, Frequency::Monthly),
    ("Bonus", 30000, Frequency::SemiAnnual),
];

/// (name, category, amount, frequency)
pub const DEMO_EXPENSES: [(&str, &str, i64, Frequency); 22] = [
    ("Husleje/boliglån", "Bolig", 12000, Frequency::Monthly),
    ("Ejendomsskat", "Bolig", 18000, Frequency::Yearly),
    ("Varme", "Forbrug", 800, Frequency::Monthly),
    ("El", "Forbrug", 600, Frequency::Monthly),
    ("Vand", "Forbrug", 2400, Frequency::Quarterly),
    ("Internet", "Forbrug", 299, Frequency::Monthly),
    ("Bil - lån", "Transport", 2500, Frequency::Monthly),
    ("Benzin", "Transport", 1500, Frequency::Monthly),
    ("Vægtafgift", "Transport", 3600, Frequency::Yearly),
    ("Bilforsikring", "Transport", 6000, Frequency::Yearly),
    ("Bilservice", "Transport", 4500, Frequency::SemiAnnual),
    ("Institution", "Børn", 3200, Frequency::Monthly),
    ("Fritidsaktiviteter", "Børn", 400, Frequency::Monthly),
    ("Dagligvarer", "Mad", 6000, Frequency::Monthly),
    ("Indboforsikring", "Forsikring", 1800, Frequency::Yearly),
    ("Ulykkesforsikring", "Forsikring", 1200, Frequency::Yearly),
    ("Tandlægeforsikring", "Forsikring", 600, Frequency::Quarterly),
    ("Netflix", "Abonnementer", 129, Frequency::Monthly),
    ("Spotify", "Abonnementer", 99, Frequency::Monthly),
    ("Fitness", "Abonnementer", 299, Frequency::Monthly),
    ("Opsparing", "Opsparing", 3000, Frequency::Monthly),
    ("Telefon", "Andet", 199, Frequency::Monthly),
];

/// The demo user's ID (the nil UUID)
pub fn demo_user_id() -> UserId {
    UserId::from_uuid(Uuid::nil())
}

/// Build the read-only demo household
pub fn demo_storage() -> BudgetResult<UserStorage> {
    let storage = UserStorage::read_only(demo_user_id());

    for category in Category::defaults() {
        storage.categories.upsert(category)?;
    }
    for (name, amount, frequency) in DEMO_INCOME {
        storage
            .income
            .upsert(Income::new(name, Money::from_units(amount), frequency))?;
    }
    for (name, category, amount, frequency) in DEMO_EXPENSES {
        storage
            .expenses
            .upsert(Expense::new(name, category, Money::from_units(amount), frequency))?;
    }

    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BudgetError;
    use crate::reports::{DashboardReport, YearlyOverview};
    use crate::services::ExpenseService;

    #[test]
    fn test_demo_household_contents() {
        let storage = demo_storage().unwrap();
        assert!(storage.is_read_only());
        assert_eq!(storage.income.count().unwrap(), 3);
        assert_eq!(storage.expenses.count().unwrap(), 22);
        assert_eq!(storage.categories.count().unwrap(), 9);
    }

    #[test]
    fn test_demo_totals() {
        let storage = demo_storage().unwrap();
        let expenses = storage.expenses.get_all().unwrap();
        let incomes = storage.income.get_all().unwrap();

        let dashboard = DashboardReport::build(&expenses, &incomes, 5);
        assert_eq!(dashboard.total_income, Money::from_units(55000));

        let overview = YearlyOverview::build(&expenses, &incomes);
        assert_eq!(overview.categories.len(), 9);
        assert_eq!(overview.income_year_total, Money::from_units(660000));
        assert_eq!(
            overview.category_year_total("Bolig"),
            Money::from_units(12000 * 12 + 18000)
        );
    }

    #[test]
    fn test_demo_is_read_only() {
        let storage = demo_storage().unwrap();
        let service = ExpenseService::new(&storage);
        assert!(matches!(
            service.delete("Netflix"),
            Err(BudgetError::ReadOnly(_))
        ));
        assert_eq!(storage.expenses.count().unwrap(), 22);
    }
}

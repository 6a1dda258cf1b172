//! Dashboard Report
//!
//! The single-figure monthly view: every record is reduced to its monthly
//! equivalent, then summed per category and per bank account.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::BudgetResult;
use crate::models::{Expense, ExpenseId, Frequency, Income, Money};
use crate::storage::UserStorage;

/// One entry in the top-expenses list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopExpense {
    pub id: ExpenseId,
    pub name: String,
    pub category: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub monthly_amount: Money,
}

/// Share of total monthly expenses taken by one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub monthly_total: Money,
    /// Percentage of all monthly expenses, 0 when there are none
    pub percentage: f64,
}

/// Monthly dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income left after expenses, negative when overspent
    pub remaining: Money,
    /// Per-category monthly totals, largest first
    pub categories: Vec<CategoryShare>,
    /// Largest expenses by monthly equivalent
    pub top_expenses: Vec<TopExpense>,
    /// Monthly totals per bank account (expenses without one are left out)
    pub account_totals: BTreeMap<String, Money>,
}

impl DashboardReport {
    /// Build the dashboard, keeping at most `top_count` top expenses
    pub fn build(expenses: &[Expense], incomes: &[Income], top_count: usize) -> Self {
        let total_income: Money = incomes.iter().map(Income::monthly_amount).sum();
        let total_expenses: Money = expenses.iter().map(Expense::monthly_amount).sum();

        let mut by_category: BTreeMap<&str, Money> = BTreeMap::new();
        let mut account_totals: BTreeMap<String, Money> = BTreeMap::new();
        for expense in expenses {
            *by_category.entry(expense.category.as_str()).or_default() += expense.monthly_amount();
            if let Some(account) = expense.account.as_deref().filter(|a| !a.is_empty()) {
                *account_totals.entry(account.to_string()).or_default() += expense.monthly_amount();
            }
        }

        let mut categories: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(category, monthly_total)| CategoryShare {
                category: category.to_string(),
                monthly_total,
                percentage: percentage_of(monthly_total, total_expenses),
            })
            .collect();
        // Stable sort keeps alphabetical order among equal totals
        categories.sort_by(|a, b| b.monthly_total.cmp(&a.monthly_total));

        let mut ranked: Vec<&Expense> = expenses.iter().collect();
        ranked.sort_by(|a, b| b.monthly_amount().cmp(&a.monthly_amount()));
        let top_expenses = ranked
            .into_iter()
            .take(top_count)
            .map(|e| TopExpense {
                id: e.id,
                name: e.name.clone(),
                category: e.category.clone(),
                amount: e.amount,
                frequency: e.frequency,
                monthly_amount: e.monthly_amount(),
            })
            .collect();

        Self {
            total_income,
            total_expenses,
            remaining: total_income - total_expenses,
            categories,
            top_expenses,
            account_totals,
        }
    }

    /// Generate the dashboard from a user's stored records
    pub fn generate(storage: &UserStorage, top_count: usize) -> BudgetResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let incomes = storage.income.get_all()?;
        Ok(Self::build(&expenses, &incomes, top_count))
    }

    /// Monthly total for one category, zero when absent
    pub fn category_total(&self, category: &str) -> Money {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.monthly_total)
            .unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let fmt = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str("Monthly Dashboard\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>20}\n", "Income:", fmt(self.total_income)));
        output.push_str(&format!("{:<30} {:>20}\n", "Expenses:", fmt(self.total_expenses)));
        output.push_str(&format!("{:<30} {:>20}\n", "Remaining:", fmt(self.remaining)));

        if self.categories.is_empty() {
            output.push_str("\nNo expenses yet.\n");
            return output;
        }

        output.push_str("\nBy category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for share in &self.categories {
            output.push_str(&format!(
                "  {:<28} {:>20} {:>6.1}%\n",
                share.category,
                fmt(share.monthly_total),
                share.percentage
            ));
        }

        output.push_str("\nTop expenses\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for (rank, expense) in self.top_expenses.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {:<25} {:>20} ({})\n",
                rank + 1,
                expense.name,
                fmt(expense.monthly_amount),
                expense.category
            ));
        }

        if !self.account_totals.is_empty() {
            output.push_str("\nBy account\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (account, total) in &self.account_totals {
                output.push_str(&format!("  {:<28} {:>20}\n", account, fmt(*total)));
            }
        }

        output
    }
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_positive() {
        part.as_f64() / whole.as_f64() * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, MonthSchedule};

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_empty_dashboard() {
        let report = DashboardReport::build(&[], &[], 5);

        assert_eq!(report.total_income, Money::zero());
        assert_eq!(report.total_expenses, Money::zero());
        assert!(report.categories.is_empty());
        assert!(report.top_expenses.is_empty());
        assert!(report.account_totals.is_empty());
    }

    #[test]
    fn test_category_totals_use_monthly_equivalent() {
        let expenses = vec![
            Expense::new("Husleje", "Bolig", units(12000), Frequency::Monthly),
            Expense::new("Bilforsikring", "Transport", units(6000), Frequency::Yearly),
        ];
        let report = DashboardReport::build(&expenses, &[], 5);

        assert_eq!(report.category_total("Bolig"), units(12000));
        assert_eq!(report.category_total("Transport"), units(500));
        assert_eq!(report.total_expenses, units(12500));
        assert_eq!(report.categories[0].category, "Bolig");
    }

    #[test]
    fn test_explicit_months_do_not_change_monthly_equivalent() {
        let expenses = vec![Expense::new("Skat", "Bolig", units(18000), Frequency::Yearly)
            .with_schedule(MonthSchedule::explicit([Month::JANUARY]))];
        let report = DashboardReport::build(&expenses, &[], 5);

        assert_eq!(report.total_expenses, units(1500));
    }

    #[test]
    fn test_remaining() {
        let expenses = vec![Expense::new("Husleje", "Bolig", units(12000), Frequency::Monthly)];
        let incomes = vec![
            Income::new("Person 1", units(28000), Frequency::Monthly),
            Income::new("Person 2", units(22000), Frequency::Monthly),
        ];
        let report = DashboardReport::build(&expenses, &incomes, 5);

        assert_eq!(report.total_income, units(50000));
        assert_eq!(report.remaining, units(38000));
    }

    #[test]
    fn test_top_expenses_sorted_and_limited() {
        let expenses: Vec<Expense> = [("Small", 100), ("Large", 5000), ("Medium", 1000)]
            .iter()
            .chain([("A", 10), ("B", 20), ("C", 30)].iter())
            .map(|(name, amount)| Expense::new(*name, "Andet", units(*amount), Frequency::Monthly))
            .collect();
        let report = DashboardReport::build(&expenses, &[], 5);

        assert_eq!(report.top_expenses.len(), 5);
        let names: Vec<&str> = report.top_expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(&names[..3], &["Large", "Medium", "Small"]);
    }

    #[test]
    fn test_category_percentages() {
        let expenses = vec![
            Expense::new("Husleje", "Bolig", units(750), Frequency::Monthly),
            Expense::new("Mad", "Mad", units(250), Frequency::Monthly),
        ];
        let report = DashboardReport::build(&expenses, &[], 5);

        assert!((report.categories[0].percentage - 75.0).abs() < 1e-9);
        assert!((report.categories[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_account_totals() {
        let expenses = vec![
            Expense::new("Husleje", "Bolig", units(12000), Frequency::Monthly)
                .with_account("Budgetkonto"),
            Expense::new("Forsikring", "Forsikring", units(2400), Frequency::Yearly)
                .with_account("Budgetkonto"),
            Expense::new("Mad", "Mad", units(4000), Frequency::Monthly),
        ];
        let report = DashboardReport::build(&expenses, &[], 5);

        assert_eq!(report.account_totals.len(), 1);
        assert_eq!(report.account_totals["Budgetkonto"], units(12200));
    }

    #[test]
    fn test_terminal_format() {
        let expenses = vec![Expense::new("Husleje", "Bolig", units(12000), Frequency::Monthly)];
        let report = DashboardReport::build(&expenses, &[], 5);
        let output = report.format_terminal("kr");

        assert!(output.contains("Monthly Dashboard"));
        assert!(output.contains("12000.00 kr"));
        assert!(output.contains("1. Husleje"));
    }
}

//! Yearly Overview Report
//!
//! Spreads every expense over the twelve months of a year and sets the
//! result against income. Rows are categories, columns are months, with
//! totals, income and balance rows underneath.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::allocation::MonthlySeries;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, Income, Money, Month};
use crate::storage::UserStorage;

/// Expenses and income for one calendar year, month by month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyOverview {
    /// Per-category allocations, keyed by category label
    pub categories: BTreeMap<String, MonthlySeries>,
    /// All categories combined
    pub totals: MonthlySeries,
    /// Income, spread evenly
    pub income: MonthlySeries,
    /// Income minus totals
    pub balance: MonthlySeries,
    /// Year total of `totals`
    pub year_total: Money,
    /// Year total of `income`
    pub income_year_total: Money,
    /// Year total of `balance`
    pub balance_year_total: Money,
}

impl YearlyOverview {
    /// Build the overview from a snapshot of a user's records
    pub fn build(expenses: &[Expense], incomes: &[Income]) -> Self {
        let mut categories: BTreeMap<String, MonthlySeries> = BTreeMap::new();
        for expense in expenses {
            let slot = categories
                .entry(expense.category.clone())
                .or_insert_with(MonthlySeries::zero);
            *slot = slot.add(&expense.monthly_amounts());
        }

        let totals: MonthlySeries = categories.values().sum();

        let monthly_income: Money = incomes.iter().map(Income::monthly_amount).sum();
        let income = MonthlySeries::uniform(monthly_income);

        let balance = income.sub(&totals);

        Self {
            year_total: totals.total(),
            income_year_total: income.total(),
            balance_year_total: balance.total(),
            categories,
            totals,
            income,
            balance,
        }
    }

    /// Generate the overview from a user's stored records
    pub fn generate(storage: &UserStorage) -> BudgetResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let incomes = storage.income.get_all()?;
        Ok(Self::build(&expenses, &incomes))
    }

    /// Year total for a single category
    pub fn category_year_total(&self, category: &str) -> Money {
        self.categories
            .get(category)
            .map(MonthlySeries::total)
            .unwrap_or_default()
    }

    /// Whether there are no expenses and no income
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.income.is_zero()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut builder = Builder::default();

        let mut header = vec!["Category".to_string()];
        header.extend(Month::all().map(|m| m.abbrev().to_string()));
        header.push("Year".to_string());
        builder.push_record(header);

        for (name, series) in &self.categories {
            builder.push_record(series_row(name, series));
        }
        builder.push_record(series_row("Total expenses", &self.totals));
        builder.push_record(series_row("Income", &self.income));
        builder.push_record(series_row("Balance", &self.balance));

        let mut table = builder.build();
        table
            .with(Style::psql())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()));

        format!("Yearly Overview\n{}\n", table)
    }

    /// Export the report to CSV format
    ///
    /// One row per category followed by `TOTAL`, `INCOME` and `BALANCE`
    /// rows; amounts use two decimals.
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Category".to_string()];
        header.extend(Month::all().map(|m| m.abbrev().to_string()));
        header.push("Year".to_string());
        csv_writer
            .write_record(&header)
            .map_err(|e| BudgetError::Export(e.to_string()))?;

        let rows = self
            .categories
            .iter()
            .map(|(name, series)| (name.as_str(), series))
            .chain([
                ("TOTAL", &self.totals),
                ("INCOME", &self.income),
                ("BALANCE", &self.balance),
            ]);

        for (name, series) in rows {
            csv_writer
                .write_record(series_row(name, series))
                .map_err(|e| BudgetError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}

fn series_row(label: &str, series: &MonthlySeries) -> Vec<String> {
    let mut row = Vec::with_capacity(14);
    row.push(label.to_string());
    row.extend(series.values().iter().map(Money::to_string));
    row.push(series.total().to_string());
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, MonthSchedule};

    fn month(n: u8) -> Month {
        Month::new(n).unwrap()
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn yearly_in_january(name: &str, category: &str, amount: i64) -> Expense {
        Expense::new(name, category, units(amount), Frequency::Yearly)
            .with_schedule(MonthSchedule::explicit([Month::JANUARY]))
    }

    #[test]
    fn test_single_monthly_expense() {
        let expenses = vec![Expense::new("Husleje", "Bolig", units(10000), Frequency::Monthly)];
        let overview = YearlyOverview::build(&expenses, &[]);

        for m in Month::all() {
            assert_eq!(overview.categories["Bolig"][m], units(10000));
        }
        assert_eq!(overview.year_total, units(120000));
    }

    #[test]
    fn test_yearly_expense_in_one_month() {
        let expenses = vec![yearly_in_january("Ejendomsskat", "Bolig", 18000)];
        let overview = YearlyOverview::build(&expenses, &[]);

        let bolig = &overview.categories["Bolig"];
        assert_eq!(bolig[Month::JANUARY], units(18000));
        for m in Month::all().skip(1) {
            assert_eq!(bolig[m], Money::zero());
        }
        assert_eq!(overview.year_total, units(18000));
    }

    #[test]
    fn test_mixed_expenses_in_one_category() {
        let expenses = vec![
            Expense::new("Husleje", "Bolig", units(5000), Frequency::Monthly),
            yearly_in_january("Ejendomsskat", "Bolig", 18000),
        ];
        let overview = YearlyOverview::build(&expenses, &[]);

        assert_eq!(overview.categories["Bolig"][month(1)], units(23000));
        assert_eq!(overview.categories["Bolig"][month(2)], units(5000));
    }

    #[test]
    fn test_balance_against_income() {
        let expenses = vec![
            Expense::new("Husleje", "Bolig", units(8000), Frequency::Monthly),
            Expense::new("Mad", "Mad", units(2000), Frequency::Monthly),
            yearly_in_january("Ejendomsskat", "Bolig", 18000),
        ];
        let incomes = vec![Income::new("Person 1", units(30000), Frequency::Monthly)];
        let overview = YearlyOverview::build(&expenses, &incomes);

        assert_eq!(overview.balance[month(1)], units(2000));
        assert_eq!(overview.balance[month(2)], units(20000));
    }

    #[test]
    fn test_category_is_sum_of_its_expenses() {
        let a = Expense::new("Bilforsikring", "Transport", units(6000), Frequency::SemiAnnual)
            .with_schedule(MonthSchedule::explicit([month(3), month(9)]));
        let b = Expense::new("Vægtafgift", "Transport", Money::from_cents(123_457), Frequency::Quarterly);
        let overview = YearlyOverview::build(&[a.clone(), b.clone()], &[]);

        let (sa, sb) = (a.monthly_amounts(), b.monthly_amounts());
        for m in Month::all() {
            assert_eq!(overview.categories["Transport"][m], sa[m] + sb[m]);
        }
    }

    #[test]
    fn test_balance_identity() {
        let expenses = vec![
            Expense::new("Husleje", "Bolig", units(12000), Frequency::Monthly),
            Expense::new("Forsikring", "Forsikring", Money::from_cents(100_001), Frequency::Quarterly),
            yearly_in_january("Ejendomsskat", "Bolig", 18000),
        ];
        let incomes = vec![
            Income::new("Person 1", units(28000), Frequency::Monthly),
            Income::new("Bonus", units(30000), Frequency::SemiAnnual),
        ];
        let overview = YearlyOverview::build(&expenses, &incomes);

        for m in Month::all() {
            assert_eq!(overview.balance[m], overview.income[m] - overview.totals[m]);
        }
        assert_eq!(overview.balance_year_total, overview.balance.total());
        assert_eq!(
            overview.balance_year_total,
            overview.income_year_total - overview.year_total
        );
    }

    #[test]
    fn test_income_is_spread() {
        let incomes = vec![
            Income::new("Person 1", units(28000), Frequency::Monthly),
            Income::new("Bonus", units(30000), Frequency::SemiAnnual),
        ];
        let overview = YearlyOverview::build(&[], &incomes);

        assert_eq!(overview.income, MonthlySeries::uniform(units(33000)));
        assert_eq!(overview.income_year_total, units(396000));
    }

    #[test]
    fn test_empty_overview_has_zero_series() {
        let overview = YearlyOverview::build(&[], &[]);

        assert!(overview.categories.is_empty());
        assert_eq!(overview.totals, MonthlySeries::zero());
        assert_eq!(overview.balance, MonthlySeries::zero());
        assert_eq!(overview.year_total, Money::zero());
        assert!(overview.is_empty());
    }

    #[test]
    fn test_terminal_format() {
        let expenses = vec![Expense::new("Husleje", "Bolig", units(10000), Frequency::Monthly)];
        let overview = YearlyOverview::build(&expenses, &[]);
        let output = overview.format_terminal();

        assert!(output.contains("Yearly Overview"));
        assert!(output.contains("Bolig"));
        assert!(output.contains("Dec"));
        assert!(output.contains("120000.00"));
        assert!(output.contains("Balance"));
    }

    #[test]
    fn test_csv_export() {
        let expenses = vec![yearly_in_january("Ejendomsskat", "Bolig", 18000)];
        let overview = YearlyOverview::build(&expenses, &[]);

        let mut output = Vec::new();
        overview.export_csv(&mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();

        assert!(csv.starts_with("Category,Jan,Feb"));
        assert!(csv.contains("Bolig,18000.00,0.00"));
        assert!(csv.contains("BALANCE,-18000.00"));
    }
}

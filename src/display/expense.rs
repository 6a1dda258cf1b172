//! Expense display formatting
//!
//! Expenses are listed grouped by category, each group followed by its
//! monthly subtotal.

use std::collections::BTreeMap;

use crate::models::{Expense, Money, Month};

use super::column_width;

/// Format expenses grouped by category
pub fn format_expense_list(grouped: &BTreeMap<String, Vec<Expense>>, currency_symbol: &str) -> String {
    if grouped.is_empty() {
        return "No expenses found.".to_string();
    }

    let name_width = column_width(
        grouped.values().flatten().map(|e| e.name.as_str()),
        4,
    );

    let mut output = String::new();
    let mut grand_total = Money::zero();

    for (category, expenses) in grouped {
        output.push_str(&format!("{}\n", category));

        for expense in expenses {
            output.push_str(&format!(
                "  {:<name_width$}  {:>14}  {:<11}  {:>14}/md  {}\n",
                expense.name,
                expense.amount.format_with_symbol(currency_symbol),
                expense.frequency.label(),
                expense.monthly_amount().format_with_symbol(currency_symbol),
                expense.schedule,
                name_width = name_width,
            ));
        }

        let subtotal: Money = expenses.iter().map(Expense::monthly_amount).sum();
        grand_total += subtotal;
        output.push_str(&format!(
            "  {:<name_width$}  {:>14}  {:<11}  {:>14}/md\n\n",
            "Subtotal",
            "",
            "",
            subtotal.format_with_symbol(currency_symbol),
            name_width = name_width,
        ));
    }

    output.push_str(&format!(
        "Total per month: {}\n",
        grand_total.format_with_symbol(currency_symbol)
    ));

    output
}

/// Format a single expense's details, including its month-by-month charges
pub fn format_expense_details(expense: &Expense, currency_symbol: &str) -> String {
    let fmt = |m: Money| m.format_with_symbol(currency_symbol);
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:             {}\n", expense.id));
    output.push_str(&format!("  Category:       {}\n", expense.category));
    output.push_str(&format!("  Amount:         {}\n", fmt(expense.amount)));
    output.push_str(&format!("  Frequency:      {}\n", expense.frequency.label()));
    output.push_str(&format!("  Months:         {}\n", expense.schedule));
    output.push_str(&format!(
        "  Account:        {}\n",
        expense.account.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("  Per month:      {}\n", fmt(expense.monthly_amount())));
    output.push_str(&format!("  Per year:       {}\n", fmt(expense.yearly_total())));

    output.push_str("\n  Charged per month:\n");
    let series = expense.monthly_amounts();
    for month in Month::all() {
        output.push_str(&format!("    {}  {:>14}\n", month.abbrev(), fmt(series[month])));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, MonthSchedule};

    #[test]
    fn test_grouped_list_has_subtotals() {
        let mut grouped = BTreeMap::new();
        grouped.insert(
            "Bolig".to_string(),
            vec![
                Expense::new("Husleje", "Bolig", Money::from_units(12000), Frequency::Monthly),
                Expense::new("Ejendomsskat", "Bolig", Money::from_units(18000), Frequency::Yearly),
            ],
        );

        let output = format_expense_list(&grouped, "kr");
        assert!(output.starts_with("Bolig\n"));
        assert!(output.contains("Ejendomsskat"));
        assert!(output.contains("13500.00 kr/md"));
        assert!(output.contains("Total per month: 13500.00 kr"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&BTreeMap::new(), "kr"), "No expenses found.");
    }

    #[test]
    fn test_details_show_charged_months() {
        let expense = Expense::new("Bilservice", "Transport", Money::from_units(4500), Frequency::SemiAnnual)
            .with_schedule(MonthSchedule::explicit([Month::new(3).unwrap(), Month::new(9).unwrap()]));

        let output = format_expense_details(&expense, "kr");
        assert!(output.contains("Months:         Mar, Sep"));
        assert!(output.contains("Mar      2250.00 kr"));
        assert!(output.contains("Jan         0.00 kr"));
    }
}

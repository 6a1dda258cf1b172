//! Income display formatting

use crate::models::{Income, Money};

use super::column_width;

/// Format income sources with their monthly equivalents and the total
pub fn format_income_list(incomes: &[Income], currency_symbol: &str) -> String {
    if incomes.is_empty() {
        return "No income registered.".to_string();
    }

    let fmt = |m: Money| m.format_with_symbol(currency_symbol);
    let name_width = column_width(incomes.iter().map(|i| i.name.as_str()), 6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>14}  {:<11}  {:>14}\n",
        "Source", "Amount", "Frequency", "Per month",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}  {:-<11}  {:->14}\n",
        "", "", "", "",
        name_width = name_width,
    ));

    for income in incomes {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}  {:<11}  {:>14}\n",
            income.name,
            fmt(income.amount),
            income.frequency.label(),
            fmt(income.monthly_amount()),
            name_width = name_width,
        ));
    }

    let total: Money = incomes.iter().map(Income::monthly_amount).sum();
    output.push_str(&format!(
        "{:<name_width$}  {:>14}  {:<11}  {:>14}\n",
        "TOTAL",
        "",
        "",
        fmt(total),
        name_width = name_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    #[test]
    fn test_income_list_total() {
        let incomes = vec![
            Income::new("Person 1", Money::from_units(28000), Frequency::Monthly),
            Income::new("Bonus", Money::from_units(30000), Frequency::SemiAnnual),
        ];

        let output = format_income_list(&incomes, "kr");
        assert!(output.contains("Semi-annual"));
        assert!(output.contains("5000.00 kr"));
        assert!(output.lines().last().unwrap().ends_with("33000.00 kr"));
    }
}

//! Account display formatting

use crate::models::Money;
use crate::services::account::AccountSummary;

use super::column_width;

/// Format a list of accounts with what is charged to each
pub fn format_account_list(summaries: &[AccountSummary], currency_symbol: &str) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = column_width(summaries.iter().map(|s| s.account.name.as_str()), 7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>8}  {:>16}\n",
        "Account", "Expenses", "Per month",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->8}  {:->16}\n",
        "", "", "",
        name_width = name_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<name_width$}  {:>8}  {:>16}\n",
            summary.account.name,
            summary.expense_count,
            summary.monthly_total.format_with_symbol(currency_symbol),
            name_width = name_width,
        ));
    }

    let total: Money = summaries.iter().map(|s| s.monthly_total).sum();
    output.push_str(&format!(
        "{:<name_width$}  {:>8}  {:>16}\n",
        "TOTAL",
        "",
        total.format_with_symbol(currency_symbol),
        name_width = name_width,
    ));

    output
}

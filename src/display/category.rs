//! Category display formatting

use crate::services::category::CategoryUsage;

use super::column_width;

/// Format categories with their usage as a table
pub fn format_category_list(categories: &[CategoryUsage], currency_symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = column_width(categories.iter().map(|c| c.category.name.as_str()), 8);
    let icon_width = column_width(categories.iter().map(|c| c.category.icon.as_str()), 4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<icon_width$}  {:>8}  {:>16}\n",
        "Category", "Icon", "Expenses", "Per month",
        name_width = name_width,
        icon_width = icon_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<icon_width$}  {:->8}  {:->16}\n",
        "", "", "", "",
        name_width = name_width,
        icon_width = icon_width,
    ));

    for usage in categories {
        output.push_str(&format!(
            "{:<name_width$}  {:<icon_width$}  {:>8}  {:>16}\n",
            usage.category.name,
            usage.category.icon,
            usage.expense_count,
            usage.monthly_total.format_with_symbol(currency_symbol),
            name_width = name_width,
            icon_width = icon_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    #[test]
    fn test_category_rows() {
        let categories = vec![CategoryUsage {
            category: Category::new("Børn", "baby"),
            expense_count: 2,
            monthly_total: Money::from_units(3600),
        }];

        let output = format_category_list(&categories, "kr");
        let row = output.lines().nth(2).unwrap();
        assert!(row.starts_with("Børn"));
        assert!(row.contains("baby"));
        assert!(row.ends_with("3600.00 kr"));
    }
}

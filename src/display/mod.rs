//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display as
//! aligned tables and detail views. Widths are counted in characters so
//! Danish names (æ, ø, å) line up.

pub mod account;
pub mod category;
pub mod expense;
pub mod income;

pub use account::format_account_list;
pub use category::format_category_list;
pub use expense::{format_expense_details, format_expense_list};
pub use income::format_income_list;

/// Widest of `min` and every label's character count
pub(crate) fn column_width<'a>(labels: impl Iterator<Item = &'a str>, min: usize) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(min).max(min)
}

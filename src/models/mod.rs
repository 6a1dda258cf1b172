//! Core data models for the household budget
//!
//! This module contains the data structures that represent the household
//! domain: users, income sources, expenses with their payment frequency and
//! month schedule, categories and bank accounts.

pub mod account;
pub mod category;
pub mod expense;
pub mod frequency;
pub mod ids;
pub mod income;
pub mod money;
pub mod schedule;
pub mod user;

pub use account::Account;
pub use category::{Category, DEFAULT_CATEGORIES};
pub use expense::Expense;
pub use frequency::Frequency;
pub use ids::{AccountId, CategoryId, ExpenseId, IncomeId, UserId};
pub use income::Income;
pub use money::Money;
pub use schedule::{Month, MonthSchedule};
pub use user::{PasswordReset, Session, User};

//! household-budget - self-hosted multi-user household budget tracker
//!
//! Users record income sources and categorized recurring expenses with
//! differing payment frequencies (monthly, quarterly, semi-annual, yearly).
//! The allocation engine spreads every expense over the twelve months of a
//! year, either evenly or into the months it is actually charged, and the
//! reports set the result against income.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `allocation`: Frequency normalization, month allocation and validation
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (income, expenses, categories, users, ...)
//! - `storage`: JSON file storage layer and session store
//! - `services`: Business logic layer
//! - `reports`: Yearly overview and monthly dashboard
//! - `audit`: Audit logging system
//! - `crypto`: Password hashing and session tokens
//! - `export`: CSV, JSON and YAML export
//! - `demo`: Read-only demo household
//!
//! # Example
//!
//! ```rust
//! use household_budget::models::{Expense, Frequency, Money};
//! use household_budget::reports::YearlyOverview;
//!
//! let expenses = vec![Expense::new("Husleje", "Bolig", Money::from_units(10000), Frequency::Monthly)];
//! let overview = YearlyOverview::build(&expenses, &[]);
//! assert_eq!(overview.year_total, Money::from_units(120000));
//! ```

pub mod allocation;
pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod demo;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};

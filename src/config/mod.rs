//! Configuration module
//!
//! This module provides configuration management including:
//! - Base directory resolution and the on-disk layout
//! - Application settings persistence

pub mod paths;
pub mod settings;

pub use paths::{BudgetPaths, UserPaths};
pub use settings::Settings;

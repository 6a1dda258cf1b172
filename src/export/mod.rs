//! Export module for the household budget
//!
//! - CSV: the yearly overview and an expense list (spreadsheet-compatible)
//! - JSON: the overview, or a user's full record set with a schema version
//! - YAML: the same, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_expenses_csv, export_overview_csv};
pub use json::{export_full_json, export_overview_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, export_overview_yaml};

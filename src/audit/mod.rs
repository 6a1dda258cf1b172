//! Audit logging
//!
//! Every create, update and delete of a user's records is appended to that
//! user's `audit.log` with before/after snapshots.
//!
//! - `AuditEntry`: one operation on one record
//! - `AuditLogger`: JSON-lines writer and reader for the log file
//! - `generate_diff`: field-level change summary between two snapshots

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

//! Reports module
//!
//! The yearly overview (month-by-month allocation of every expense against
//! income) and the monthly dashboard (one monthly-equivalent figure per
//! record, summed).

pub mod dashboard;
pub mod yearly_overview;

pub use dashboard::{CategoryShare, DashboardReport, TopExpense};
pub use yearly_overview::YearlyOverview;

//! Calendar months and expense month schedules
//!
//! An expense is either spread evenly across the year or charged in an
//! explicit set of months. The two cases are a sum type so that "no months"
//! can only ever mean "spread".

use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, 1 (January) through 12 (December)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const DECEMBER: Month = Month(12);

    /// Create a month from its number, `None` outside 1-12
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= 12 {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Create a month from any integer, `None` outside 1-12
    pub fn from_i64(number: i64) -> Option<Self> {
        u8::try_from(number).ok().and_then(Self::new)
    }

    /// The month number (1-12)
    pub const fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based index into a 12-slot array
    pub const fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    /// Three-letter English abbreviation
    pub fn abbrev(&self) -> &'static str {
        MONTH_NAMES[self.index()]
    }

    /// All twelve months in calendar order
    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }
}

impl TryFrom<u8> for Month {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Month::new(value).ok_or_else(|| format!("month out of range: {}", value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which months an expense's periodic charge falls in
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Vec<Month>>", into = "Option<Vec<Month>>")]
pub enum MonthSchedule {
    /// Unknown months: smear the yearly total evenly over all twelve
    #[default]
    Spread,
    /// Charged only in these months (ascending, no duplicates)
    Explicit(Vec<Month>),
}

impl MonthSchedule {
    /// Build an explicit schedule, canonicalized ascending and deduplicated
    ///
    /// An empty list yields `Spread`.
    pub fn explicit(months: impl IntoIterator<Item = Month>) -> Self {
        let mut months: Vec<Month> = months.into_iter().collect();
        months.sort();
        months.dedup();
        if months.is_empty() {
            Self::Spread
        } else {
            Self::Explicit(months)
        }
    }

    pub fn is_spread(&self) -> bool {
        matches!(self, Self::Spread)
    }

    /// The explicit months, empty for `Spread`
    pub fn months(&self) -> &[Month] {
        match self {
            Self::Spread => &[],
            Self::Explicit(months) => months,
        }
    }

    /// Whether the schedule charges in the given month
    pub fn contains(&self, month: Month) -> bool {
        match self {
            Self::Spread => true,
            Self::Explicit(months) => months.contains(&month),
        }
    }
}

impl From<Option<Vec<Month>>> for MonthSchedule {
    fn from(months: Option<Vec<Month>>) -> Self {
        match months {
            Some(months) => Self::explicit(months),
            None => Self::Spread,
        }
    }
}

impl From<MonthSchedule> for Option<Vec<Month>> {
    fn from(schedule: MonthSchedule) -> Self {
        match schedule {
            MonthSchedule::Spread => None,
            MonthSchedule::Explicit(months) => Some(months),
        }
    }
}

impl fmt::Display for MonthSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spread => write!(f, "spread"),
            Self::Explicit(months) => {
                let names: Vec<&str> = months.iter().map(|m| m.abbrev()).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

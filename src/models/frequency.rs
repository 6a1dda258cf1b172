//! Payment frequency
//!
//! The closed set of cadences at which an income or expense amount is
//! charged. Every per-frequency constant is an exhaustive match so a new
//! cadence cannot be added without updating each call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a recurring amount is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    /// Charged every month
    #[default]
    Monthly,
    /// Charged four times a year
    Quarterly,
    /// Charged twice a year
    SemiAnnual,
    /// Charged once a year
    Yearly,
}

impl Frequency {
    /// All frequencies in ascending period length
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::SemiAnnual,
            Frequency::Yearly,
        ]
    }

    /// Number of times the amount is charged in a calendar year
    pub const fn occurrences_per_year(&self) -> i64 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::SemiAnnual => 2,
            Self::Yearly => 1,
        }
    }

    /// Number of explicit months an expense of this frequency must name
    ///
    /// `None` for monthly: a monthly charge has no "which months" concept.
    pub const fn required_months(&self) -> Option<usize> {
        match self {
            Self::Monthly => None,
            Self::Quarterly => Some(4),
            Self::SemiAnnual => Some(2),
            Self::Yearly => Some(1),
        }
    }

    /// Length of one period in months
    pub const fn period_months(&self) -> i64 {
        12 / self.occurrences_per_year()
    }

    /// Wire name used in storage and on the command line
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Yearly => "yearly",
        }
    }

    /// Human label for tables
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::SemiAnnual => "Semi-annual",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "quarterly" | "quarter" | "q" => Ok(Self::Quarterly),
            "semi-annual" | "semiannual" | "semi-annually" | "half-yearly" | "biannual" => {
                Ok(Self::SemiAnnual)
            }
            "yearly" | "annual" | "annually" | "year" | "y" => Ok(Self::Yearly),
            other => Err(FrequencyParseError(other.to_string())),
        }
    }
}

/// Error returned for an unknown frequency name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(pub String);

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown frequency '{}' (expected monthly, quarterly, semi-annual or yearly)",
            self.0
        )
    }
}

impl std::error::Error for FrequencyParseError {}

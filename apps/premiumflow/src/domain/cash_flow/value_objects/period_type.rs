//! Period Type and Assignment Handling Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::cash_flow::errors::ReportError;

/// Bucket granularity for a cash-flow report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodType {
    /// One bucket per calendar day.
    #[serde(alias = "daily")]
    Daily,
    /// One bucket per ISO week.
    #[serde(alias = "weekly")]
    Weekly,
    /// One bucket per calendar month.
    #[default]
    #[serde(alias = "monthly")]
    Monthly,
    /// A single bucket for everything.
    #[serde(alias = "total")]
    Total,
}

impl PeriodType {
    /// Every period type.
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Total];

    /// Canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Total => "TOTAL",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ReportError::UnknownPeriodType {
                value: s.to_string(),
            })
    }
}

/// How assignment cash is treated in credits, debits, fees and net P/L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentHandling {
    /// Assignment cash counts like any other transaction.
    #[default]
    #[serde(alias = "include")]
    Include,
    /// Assignment cash and fees are withheld from the period totals.
    #[serde(alias = "exclude")]
    Exclude,
}

impl AssignmentHandling {
    /// Canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "INCLUDE",
            Self::Exclude => "EXCLUDE",
        }
    }

    /// Check if assignment cash counts toward period totals.
    #[must_use]
    pub const fn includes_assignments(&self) -> bool {
        matches!(self, Self::Include)
    }
}

impl fmt::Display for AssignmentHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentHandling {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCLUDE" => Ok(Self::Include),
            "EXCLUDE" => Ok(Self::Exclude),
            _ => Err(ReportError::UnknownAssignmentHandling {
                value: s.to_string(),
            }),
        }
    }
}

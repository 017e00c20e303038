//! Period Key Value Object

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

use super::PeriodType;

/// Sortable identity of a report bucket.
///
/// Renders as `2025-01-02`, `2025-W02`, `2025-01` or `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    /// A calendar day.
    Day(NaiveDate),
    /// An ISO week.
    Week {
        /// ISO week-numbering year.
        year: i32,
        /// ISO week number (1-53).
        week: u32,
    },
    /// A calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month number (1-12).
        month: u32,
    },
    /// The grand total.
    Total,
}

impl PeriodKey {
    /// Bucket `date` falls into for `period_type`.
    #[must_use]
    pub fn for_date(period_type: PeriodType, date: NaiveDate) -> Self {
        match period_type {
            PeriodType::Daily => Self::Day(date),
            PeriodType::Weekly => {
                let iso = date.iso_week();
                Self::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            PeriodType::Monthly => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            PeriodType::Total => Self::Total,
        }
    }

    /// Human-readable label, e.g. `Week 2, 2025` or `January 2025`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Day(date) => date.format("%Y-%m-%d").to_string(),
            Self::Week { year, week } => format!("Week {week}, {year}"),
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
                .map_or_else(
                    || format!("{year}-{month:02}"),
                    |first| first.format("%B %Y").to_string(),
                ),
            Self::Total => "Total".to_string(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Week { year, week } => write!(f, "{year}-W{week:02}"),
            Self::Month { year, month } => write!(f, "{year}-{month:02}"),
            Self::Total => write!(f, "total"),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

//! Reporting defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::cash_flow::{AssignmentHandling, PeriodType, ReportOptions};

/// Defaults for cash-flow reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Bucket granularity.
    #[serde(default)]
    pub period_type: PeriodType,
    /// Assignment treatment.
    #[serde(default)]
    pub assignment_handling: AssignmentHandling,
    /// Inclusive lower date bound.
    #[serde(default)]
    pub since: Option<NaiveDate>,
    /// Inclusive upper date bound.
    #[serde(default)]
    pub until: Option<NaiveDate>,
    /// Only report this underlying.
    #[serde(default)]
    pub ticker: Option<String>,
}

impl ReportingConfig {
    /// Report filters described by this section.
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            since: self.since,
            until: self.until,
            ticker: self
                .ticker
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(Into::into),
        }
    }
}

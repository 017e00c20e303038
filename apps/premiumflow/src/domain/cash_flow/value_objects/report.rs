//! Cash Flow P/L Report

use serde::Serialize;

use super::{AssignmentHandling, PeriodMetrics, PeriodType};

/// Period-bucketed cash flow and realized P/L.
///
/// `periods` only holds buckets with activity, in chronological order;
/// `totals` is their sum. The account fields are set when every reported
/// transaction belongs to the same account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowPnlReport {
    account_name: Option<String>,
    account_number: Option<String>,
    period_type: PeriodType,
    assignment_handling: AssignmentHandling,
    periods: Vec<PeriodMetrics>,
    totals: PeriodMetrics,
}

impl CashFlowPnlReport {
    /// Build a report; totals are derived from `periods`.
    #[must_use]
    pub fn new(
        period_type: PeriodType,
        assignment_handling: AssignmentHandling,
        periods: Vec<PeriodMetrics>,
    ) -> Self {
        let totals = PeriodMetrics::total(&periods);
        Self {
            account_name: None,
            account_number: None,
            period_type,
            assignment_handling,
            periods,
            totals,
        }
    }

    /// Attach the account the report covers.
    #[must_use]
    pub fn with_account(
        mut self,
        account_name: impl Into<String>,
        account_number: Option<String>,
    ) -> Self {
        self.account_name = Some(account_name.into());
        self.account_number = account_number;
        self
    }

    /// Get the account name.
    #[must_use]
    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    /// Get the account number.
    #[must_use]
    pub fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }

    /// Get the period type.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// Get the assignment handling mode.
    #[must_use]
    pub const fn assignment_handling(&self) -> AssignmentHandling {
        self.assignment_handling
    }

    /// Get the periods.
    #[must_use]
    pub fn periods(&self) -> &[PeriodMetrics] {
        &self.periods
    }

    /// Get the grand total.
    #[must_use]
    pub const fn totals(&self) -> &PeriodMetrics {
        &self.totals
    }

    /// Check if no transaction was bucketed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

//! Report Options Value Object

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::cash_flow::errors::ReportError;
use crate::domain::option_transaction::NormalizedOptionTransaction;
use crate::domain::shared::Symbol;

/// Filters applied to transactions before bucketing.
///
/// Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Earliest activity date to include.
    #[serde(default)]
    pub since: Option<NaiveDate>,
    /// Latest activity date to include.
    #[serde(default)]
    pub until: Option<NaiveDate>,
    /// Only include this underlying.
    #[serde(default)]
    pub ticker: Option<Symbol>,
}

impl ReportOptions {
    /// Set the lower bound.
    #[must_use]
    pub const fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    /// Set the upper bound.
    #[must_use]
    pub const fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    /// Restrict to one underlying.
    #[must_use]
    pub fn with_ticker(mut self, ticker: impl Into<Symbol>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Check the window is not inverted.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] when `since > until`.
    pub fn validate(&self) -> Result<(), ReportError> {
        match (self.since, self.until) {
            (Some(since), Some(until)) if since > until => {
                Err(ReportError::InvalidDateRange { since, until })
            }
            _ => Ok(()),
        }
    }

    /// Check whether `txn` passes every filter.
    #[must_use]
    pub fn includes(&self, txn: &NormalizedOptionTransaction) -> bool {
        self.contains_date(txn.activity_date()) && self.includes_underlying(txn.underlying())
    }

    /// Check whether `date` falls inside the window.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.since.is_none_or(|since| date >= since) && self.until.is_none_or(|until| date <= until)
    }

    /// Check whether `underlying` passes the ticker filter.
    #[must_use]
    pub fn includes_underlying(&self, underlying: &Symbol) -> bool {
        self.ticker.as_ref().is_none_or(|ticker| underlying == ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option_transaction::{ActionCode, ContractKey, OptionType};
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn txn(underlying: &str, day: u32) -> NormalizedOptionTransaction {
        NormalizedOptionTransaction::new(
            date(day),
            ContractKey::new(underlying, dec!(100), date(31), OptionType::Put),
            ActionCode::OpenSell,
            1,
            dec!(1),
        )
    }

    #[test]
    fn default_includes_everything() {
        let options = ReportOptions::default();
        assert!(options.validate().is_ok());
        assert!(options.includes(&txn("SPY", 1)));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let options = ReportOptions::default().with_since(date(5)).with_until(date(10));
        assert!(!options.includes(&txn("SPY", 4)));
        assert!(options.includes(&txn("SPY", 5)));
        assert!(options.includes(&txn("SPY", 10)));
        assert!(!options.includes(&txn("SPY", 11)));
    }

    #[test]
    fn ticker_filter_is_case_insensitive() {
        let options = ReportOptions::default().with_ticker("spy");
        assert!(options.includes(&txn("SPY", 3)));
        assert!(!options.includes(&txn("QQQ", 3)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let options = ReportOptions::default().with_since(date(10)).with_until(date(5));
        assert_eq!(
            options.validate(),
            Err(ReportError::InvalidDateRange {
                since: date(10),
                until: date(5)
            })
        );
    }
}

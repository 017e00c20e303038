//! Cash Flow Report Errors

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::option_transaction::TransactionError;

/// Faults raised while building a cash-flow report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The input failed validation before aggregation started.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] TransactionError),

    /// The reporting window is inverted.
    #[error("Invalid date range: since {since} is after until {until}")]
    InvalidDateRange {
        /// Inclusive lower bound.
        since: NaiveDate,
        /// Inclusive upper bound.
        until: NaiveDate,
    },

    /// A period type name could not be recognized.
    #[error("Unknown period type: {value}")]
    UnknownPeriodType {
        /// The raw value.
        value: String,
    },

    /// An assignment handling name could not be recognized.
    #[error("Unknown assignment handling: {value}")]
    UnknownAssignmentHandling {
        /// The raw value.
        value: String,
    },
}

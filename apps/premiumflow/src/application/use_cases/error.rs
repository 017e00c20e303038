//! Use case errors.

use thiserror::Error;

use crate::application::ports::TransactionSourceError;
use crate::domain::cash_flow::ReportError;
use crate::domain::leg_matching::MatchingError;

/// Errors surfaced by application use cases.
#[derive(Debug, Error)]
pub enum UseCaseError {
    /// Transactions could not be loaded.
    #[error(transparent)]
    Source(#[from] TransactionSourceError),

    /// Leg matching failed.
    #[error(transparent)]
    Matching(#[from] MatchingError),

    /// Report generation failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

//! Leg Matching Errors

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::option_transaction::{ActionCode, PositionSide, TransactionError};

/// Faults raised while reconstructing legs from a transaction stream.
///
/// Matching never clamps: an inconsistent stream aborts the whole call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchingError {
    /// The input failed validation before matching started.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] TransactionError),

    /// A close, expiration or assignment asked for more contracts than are open.
    #[error(
        "{leg_id}: {action} on {date} for {requested} contracts exceeds {available} open"
    )]
    OverClose {
        /// Contract identifier.
        leg_id: String,
        /// Date of the offending event.
        date: NaiveDate,
        /// Offending action.
        action: ActionCode,
        /// Contracts the event tried to resolve.
        requested: u32,
        /// Contracts open at that point.
        available: u64,
    },

    /// A resolving event arrived with nothing open on the contract.
    #[error("{leg_id}: {action} on {date} with no open position")]
    NoOpenPosition {
        /// Contract identifier.
        leg_id: String,
        /// Date of the offending event.
        date: NaiveDate,
        /// Offending action.
        action: ActionCode,
    },

    /// The event's direction does not match the open position.
    #[error("{leg_id}: {action} on {date} conflicts with open {open_side} position")]
    DirectionConflict {
        /// Contract identifier.
        leg_id: String,
        /// Date of the offending event.
        date: NaiveDate,
        /// Offending action.
        action: ActionCode,
        /// Side of the lots currently open.
        open_side: PositionSide,
    },

    /// A leg lifecycle rule was broken.
    #[error("{leg_id}: {message}")]
    InvariantViolation {
        /// Contract identifier.
        leg_id: String,
        /// What went wrong.
        message: String,
    },
}

impl MatchingError {
    /// Identifier of the contract involved, if the fault is tied to one.
    #[must_use]
    pub fn leg_id(&self) -> Option<&str> {
        match self {
            Self::InvalidTransaction(_) => None,
            Self::OverClose { leg_id, .. }
            | Self::NoOpenPosition { leg_id, .. }
            | Self::DirectionConflict { leg_id, .. }
            | Self::InvariantViolation { leg_id, .. } => Some(leg_id),
        }
    }
}

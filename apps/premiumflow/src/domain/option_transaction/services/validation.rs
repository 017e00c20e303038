//! Fail-fast validation over a whole transaction slice.

use crate::domain::option_transaction::errors::TransactionError;
use crate::domain::option_transaction::value_objects::NormalizedOptionTransaction;

/// Validate every transaction before any processing starts.
///
/// No partial result is ever produced from a slice that fails here.
///
/// # Errors
///
/// Returns the first [`TransactionError`] found, in slice order.
pub fn validate_transactions(
    transactions: &[NormalizedOptionTransaction],
) -> Result<(), TransactionError> {
    transactions
        .iter()
        .enumerate()
        .try_for_each(|(index, txn)| txn.validate(index))
}

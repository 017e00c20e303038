//! Chronological ordering of transactions.
//!
//! Broker exports carry dates without reliable intraday times. Transactions on
//! the same date keep their input order, so the row order of the export is the
//! tie-break. This is an approximation of the true intraday sequence.

use crate::domain::option_transaction::value_objects::NormalizedOptionTransaction;

/// Indices of `transactions` sorted by activity date, stable on ties.
#[must_use]
pub fn chronological_order(transactions: &[NormalizedOptionTransaction]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..transactions.len()).collect();
    // sort_by_key is stable
    order.sort_by_key(|&index| transactions[index].activity_date());
    order
}

//! In-memory transaction repository for testing.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{TransactionQuery, TransactionSourceError, TransactionSourcePort};
use crate::domain::option_transaction::NormalizedOptionTransaction;

/// In-memory implementation of `TransactionSourcePort`.
///
/// Suitable for testing and development. Keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTransactionRepository {
    transactions: RwLock<Vec<NormalizedOptionTransaction>>,
}

impl InMemoryTransactionRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with `transactions`.
    #[must_use]
    pub const fn with_transactions(transactions: Vec<NormalizedOptionTransaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
        }
    }

    /// Get the number of stored transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every transaction.
    pub fn clear(&self) {
        self.transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Append transactions.
    pub fn extend(&self, transactions: impl IntoIterator<Item = NormalizedOptionTransaction>) {
        self.transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(transactions);
    }
}

#[async_trait]
impl TransactionSourcePort for InMemoryTransactionRepository {
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<NormalizedOptionTransaction>, TransactionSourceError> {
        let transactions = self
            .transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(transactions
            .iter()
            .filter(|txn| query.matches(txn))
            .cloned()
            .collect())
    }
}

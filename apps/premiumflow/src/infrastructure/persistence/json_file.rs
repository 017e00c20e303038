//! JSON file transaction source.
//!
//! Reads a JSON array of normalized transactions, as written by the CSV
//! normalizer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{TransactionQuery, TransactionSourceError, TransactionSourcePort};
use crate::domain::option_transaction::NormalizedOptionTransaction;

/// Loads transactions from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileTransactionSource {
    path: PathBuf,
}

impl JsonFileTransactionSource {
    /// Create a source backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<NormalizedOptionTransaction>, TransactionSourceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|source| {
            TransactionSourceError::Read {
                path: self.path.clone(),
                source,
            }
        })?;
        serde_json::from_str(&content).map_err(|source| TransactionSourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl TransactionSourcePort for JsonFileTransactionSource {
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<NormalizedOptionTransaction>, TransactionSourceError> {
        let transactions = self.load().await?;
        let total = transactions.len();
        let selected: Vec<_> = transactions
            .into_iter()
            .filter(|txn| query.matches(txn))
            .collect();

        tracing::debug!(
            path = %self.path.display(),
            total,
            selected = selected.len(),
            "Loaded transactions"
        );
        Ok(selected)
    }
}

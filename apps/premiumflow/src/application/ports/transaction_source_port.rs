//! Transaction Source Port (Driven Port)
//!
//! Interface for loading normalized transactions from wherever they are kept.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::option_transaction::NormalizedOptionTransaction;
use crate::domain::shared::Symbol;

/// Selects which transactions to load.
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Account display name.
    pub account_name: Option<String>,
    /// Broker account number.
    pub account_number: Option<String>,
    /// Underlying symbol.
    pub ticker: Option<Symbol>,
}

impl TransactionQuery {
    /// Query every transaction of one account.
    #[must_use]
    pub fn for_account(account_name: impl Into<String>) -> Self {
        Self {
            account_name: Some(account_name.into()),
            ..Self::default()
        }
    }

    /// Narrow to one account number.
    #[must_use]
    pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    /// Narrow to one underlying.
    #[must_use]
    pub fn with_ticker(mut self, ticker: impl Into<Symbol>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Check whether `txn` satisfies the query.
    #[must_use]
    pub fn matches(&self, txn: &NormalizedOptionTransaction) -> bool {
        self.account_name
            .as_deref()
            .is_none_or(|name| txn.account_name() == name)
            && self
                .account_number
                .as_deref()
                .is_none_or(|number| txn.account_number() == Some(number))
            && self
                .ticker
                .as_ref()
                .is_none_or(|ticker| txn.underlying() == ticker)
    }
}

/// Errors from transaction sources.
#[derive(Debug, Error)]
pub enum TransactionSourceError {
    /// The backing file could not be read.
    #[error("Failed to read transactions from {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The backing data was malformed.
    #[error("Failed to parse transactions from {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The source is not reachable.
    #[error("Transaction source unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading transactions.
#[async_trait]
pub trait TransactionSourcePort: Send + Sync {
    /// Fetch the transactions matching `query`, in source order.
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<NormalizedOptionTransaction>, TransactionSourceError>;
}

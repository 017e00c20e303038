//! Transaction source configuration.

use serde::{Deserialize, Serialize};

use crate::application::ports::TransactionQuery;

/// Where transactions come from and which account to read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to a JSON array of normalized transactions.
    #[serde(default = "default_transactions_path")]
    pub transactions_path: String,
    /// Account display name; unset reads every account.
    #[serde(default)]
    pub account_name: Option<String>,
    /// Broker account number.
    #[serde(default)]
    pub account_number: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            transactions_path: default_transactions_path(),
            account_name: None,
            account_number: None,
        }
    }
}

impl SourceConfig {
    /// Query selecting the configured account.
    #[must_use]
    pub fn query(&self) -> TransactionQuery {
        TransactionQuery {
            account_name: non_empty(self.account_name.as_deref()),
            account_number: non_empty(self.account_number.as_deref()),
            ticker: None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn default_transactions_path() -> String {
    "transactions.json".to_string()
}

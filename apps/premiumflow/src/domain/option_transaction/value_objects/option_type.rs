//! Option Type Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::option_transaction::errors::TransactionError;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option (right to buy).
    #[serde(alias = "C", alias = "Call")]
    Call,
    /// Put option (right to sell).
    #[serde(alias = "P", alias = "Put")]
    Put,
}

impl OptionType {
    /// Single-letter code used in leg identifiers.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

impl FromStr for OptionType {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CALL" | "C" => Ok(Self::Call),
            "PUT" | "P" => Ok(Self::Put),
            _ => Err(TransactionError::UnknownOptionType {
                value: s.to_string(),
            }),
        }
    }
}

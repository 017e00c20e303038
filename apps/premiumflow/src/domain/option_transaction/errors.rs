//! Option Transaction Errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Input validation faults for normalized transactions.
///
/// Raised before any matching or aggregation starts; the whole call aborts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Quantity was zero.
    #[error("Transaction {index}: quantity must be positive")]
    NonPositiveQuantity {
        /// Position of the transaction in the input.
        index: usize,
    },

    /// Fees were negative.
    #[error("Transaction {index}: fees must not be negative (got {fees})")]
    NegativeFees {
        /// Position of the transaction in the input.
        index: usize,
        /// The offending fee amount.
        fees: Decimal,
    },

    /// Underlying symbol was blank.
    #[error("Transaction {index}: underlying symbol is empty")]
    EmptyUnderlying {
        /// Position of the transaction in the input.
        index: usize,
    },

    /// Strike was zero or negative.
    #[error("Transaction {index}: strike must be positive (got {strike})")]
    NonPositiveStrike {
        /// Position of the transaction in the input.
        index: usize,
        /// The offending strike.
        strike: Decimal,
    },

    /// Action code could not be recognized.
    #[error("Unknown action code: {code}")]
    UnknownActionCode {
        /// The raw code.
        code: String,
    },

    /// Option type could not be recognized.
    #[error("Unknown option type: {value}")]
    UnknownOptionType {
        /// The raw value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn error_display() {
        let err = TransactionError::NonPositiveQuantity { index: 3 };
        assert_eq!(err.to_string(), "Transaction 3: quantity must be positive");

        let err = TransactionError::NegativeFees {
            index: 0,
            fees: dec!(-0.04),
        };
        assert_eq!(
            err.to_string(),
            "Transaction 0: fees must not be negative (got -0.04)"
        );

        let err = TransactionError::UnknownActionCode {
            code: "XYZ".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown action code: XYZ");
    }
}

//! Normalized Option Transaction Value Object

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ActionCode, ContractKey, OptionType};
use crate::domain::option_transaction::errors::TransactionError;
use crate::domain::shared::{Money, Symbol};

/// One parsed fill or lifecycle event for a single option contract.
///
/// Produced by the normalizer; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedOptionTransaction {
    /// Trade (activity) date.
    activity_date: NaiveDate,
    /// Underlying symbol.
    underlying: Symbol,
    /// Contract expiration.
    expiration: NaiveDate,
    /// Strike price.
    strike: Decimal,
    /// Call or put.
    option_type: OptionType,
    /// What the transaction did.
    action_code: ActionCode,
    /// Number of contracts.
    quantity: u32,
    /// Premium per share as quoted by the broker.
    premium_per_contract: Decimal,
    /// Commissions and regulatory fees (non-negative).
    #[serde(default)]
    fees: Decimal,
    /// Account display name.
    #[serde(default)]
    account_name: String,
    /// Broker account number, when known.
    #[serde(default)]
    account_number: Option<String>,
}

impl NormalizedOptionTransaction {
    /// Create a transaction with zero fees and no account identity.
    #[must_use]
    pub fn new(
        activity_date: NaiveDate,
        contract: ContractKey,
        action_code: ActionCode,
        quantity: u32,
        premium_per_contract: Decimal,
    ) -> Self {
        Self {
            activity_date,
            underlying: contract.underlying().clone(),
            expiration: contract.expiration(),
            strike: contract.strike(),
            option_type: contract.option_type(),
            action_code,
            quantity,
            premium_per_contract,
            fees: Decimal::ZERO,
            account_name: String::new(),
            account_number: None,
        }
    }

    /// Set the fees charged on this transaction.
    #[must_use]
    pub const fn with_fees(mut self, fees: Decimal) -> Self {
        self.fees = fees;
        self
    }

    /// Set the account identity.
    #[must_use]
    pub fn with_account(
        mut self,
        account_name: impl Into<String>,
        account_number: Option<String>,
    ) -> Self {
        self.account_name = account_name.into();
        self.account_number = account_number;
        self
    }

    /// Get the activity date.
    #[must_use]
    pub const fn activity_date(&self) -> NaiveDate {
        self.activity_date
    }

    /// Get the underlying symbol.
    #[must_use]
    pub const fn underlying(&self) -> &Symbol {
        &self.underlying
    }

    /// Get the expiration date.
    #[must_use]
    pub const fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    /// Get the strike price.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Get the option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Get the action code.
    #[must_use]
    pub const fn action_code(&self) -> ActionCode {
        self.action_code
    }

    /// Get the number of contracts.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Get the quoted per-contract premium.
    #[must_use]
    pub const fn premium_per_contract(&self) -> Decimal {
        self.premium_per_contract
    }

    /// Get the raw fee amount.
    #[must_use]
    pub const fn fees(&self) -> Decimal {
        self.fees
    }

    /// Get the account name.
    #[must_use]
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Get the account number.
    #[must_use]
    pub fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }

    /// Identity of the contract this transaction touches.
    #[must_use]
    pub fn contract_key(&self) -> ContractKey {
        ContractKey::new(
            self.underlying.clone(),
            self.strike,
            self.expiration,
            self.option_type,
        )
    }

    /// Signed dollar cash movement before fees (credit positive).
    ///
    /// Trades take their direction from the action code. Assignments keep the
    /// sign the broker reported. Expirations move no cash.
    #[must_use]
    pub fn gross_amount(&self) -> Money {
        match self.action_code {
            ActionCode::OpenSell | ActionCode::CloseSell => {
                Money::from_premium(self.premium_per_contract.abs(), self.quantity)
            }
            ActionCode::OpenBuy | ActionCode::CloseBuy => {
                -Money::from_premium(self.premium_per_contract.abs(), self.quantity)
            }
            ActionCode::Assign => Money::from_premium(self.premium_per_contract, self.quantity),
            ActionCode::Expire => Money::ZERO,
        }
    }

    /// Fees as money.
    #[must_use]
    pub const fn fee_amount(&self) -> Money {
        Money::new(self.fees)
    }

    /// Cash movement after fees.
    #[must_use]
    pub fn net_amount(&self) -> Money {
        self.gross_amount() - self.fee_amount()
    }

    /// Check the record against the input contract.
    ///
    /// `index` is the position in the caller's slice, used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError`] for a zero quantity, a non-positive
    /// strike, a blank underlying or negative fees.
    pub fn validate(&self, index: usize) -> Result<(), TransactionError> {
        if self.quantity == 0 {
            return Err(TransactionError::NonPositiveQuantity { index });
        }
        if self.fees < Decimal::ZERO {
            return Err(TransactionError::NegativeFees {
                index,
                fees: self.fees,
            });
        }
        if self.underlying.is_empty() {
            return Err(TransactionError::EmptyUnderlying { index });
        }
        if self.strike <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveStrike {
                index,
                strike: self.strike,
            });
        }
        Ok(())
    }
}

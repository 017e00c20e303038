//! Contract Key Value Object

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::OptionType;
use crate::domain::shared::Symbol;

/// Identity of a single option contract.
///
/// Two fills can only be matched against each other when their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractKey {
    /// Underlying symbol.
    underlying: Symbol,
    /// Strike price.
    strike: Decimal,
    /// Expiration date.
    expiration: NaiveDate,
    /// Call or put.
    option_type: OptionType,
}

impl ContractKey {
    /// Create a new contract key.
    ///
    /// The strike is normalized so `500` and `500.00` identify the same contract.
    #[must_use]
    pub fn new(
        underlying: impl Into<Symbol>,
        strike: Decimal,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            strike: strike.normalize(),
            expiration,
            option_type,
        }
    }

    /// Get the underlying symbol.
    #[must_use]
    pub const fn underlying(&self) -> &Symbol {
        &self.underlying
    }

    /// Get the strike price.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Get the expiration date.
    #[must_use]
    pub const fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    /// Get the option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Stable string identifier, e.g. `TSLA-2025-02-21-C-50000`.
    ///
    /// The trailing component is the strike in cents.
    #[must_use]
    pub fn leg_id(&self) -> String {
        let strike_cents = (self.strike.round_dp(2) * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .unwrap_or_default();
        format!(
            "{}-{}-{}-{}",
            self.underlying,
            self.expiration.format("%Y-%m-%d"),
            self.option_type.code(),
            strike_cents
        )
    }

    /// Whole days from `as_of` until expiration, never negative.
    #[must_use]
    pub fn days_to_expiration(&self, as_of: NaiveDate) -> i64 {
        (self.expiration - as_of).num_days().max(0)
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ${} {}",
            self.underlying,
            self.expiration.format("%Y-%m-%d"),
            self.strike,
            self.option_type
        )
    }
}

//! Matched Leg DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::leg_matching::{LegStatus, MatchedLeg, MatchedLegLot};
use crate::domain::option_transaction::{OptionType, PositionSide};
use crate::domain::shared::Money;
use rust_decimal::Decimal;

/// Flattened view of a leg with its derived summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedLegDto {
    /// Contract identifier.
    pub leg_id: String,
    /// Account display name.
    pub account_name: String,
    /// Broker account number.
    pub account_number: Option<String>,
    /// Underlying symbol.
    pub underlying: String,
    /// Strike price.
    pub strike: Decimal,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Call or put.
    pub option_type: OptionType,
    /// Long or short.
    pub direction: PositionSide,
    /// Lifecycle state.
    pub status: LegStatus,
    /// First opening date.
    pub opened_date: NaiveDate,
    /// Closing date.
    pub closed_date: Option<NaiveDate>,
    /// Contracts still open.
    pub open_quantity: u64,
    /// Signed open contracts.
    pub net_contracts: i64,
    /// Realized P/L after fees.
    pub realized_pnl: Money,
    /// Opening cash on lots still open.
    pub open_premium: Money,
    /// All fees on the leg.
    pub total_fees: Money,
    /// Days until expiration as of the report date.
    pub days_to_expiration: i64,
    /// Matched lots.
    pub lots: Vec<MatchedLegLot>,
}

impl MatchedLegDto {
    /// Create from a domain leg, measuring expiration from `as_of`.
    #[must_use]
    pub fn from_leg(leg: &MatchedLeg, as_of: NaiveDate) -> Self {
        let contract = leg.contract();
        Self {
            leg_id: leg.leg_id(),
            account_name: leg.account_name().to_string(),
            account_number: leg.account_number().map(str::to_string),
            underlying: contract.underlying().to_string(),
            strike: contract.strike(),
            expiration: contract.expiration(),
            option_type: contract.option_type(),
            direction: leg.direction(),
            status: leg.status(),
            opened_date: leg.opened_date(),
            closed_date: leg.closed_date(),
            open_quantity: leg.open_quantity(),
            net_contracts: leg.net_contracts(),
            realized_pnl: leg.realized_pnl(),
            open_premium: leg.open_premium(),
            total_fees: leg.total_fees(),
            days_to_expiration: leg.days_to_expiration(as_of),
            lots: leg.lots().to_vec(),
        }
    }
}

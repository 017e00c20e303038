//! Matched Leg Aggregate Root
//!
//! A leg is the lifetime of one position on one contract in one account,
//! from the first opening fill until the last open contract is resolved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::leg_matching::errors::MatchingError;
use crate::domain::leg_matching::value_objects::{LegStatus, MatchedLegLot};
use crate::domain::option_transaction::{ContractKey, PositionSide};
use crate::domain::shared::Money;

/// A reconstructed position and the lots that make it up.
///
/// Lots are kept in FIFO resolution order; lots still open when the stream
/// ended come last. A closed leg is never reopened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedLeg {
    /// Contract identity.
    contract: ContractKey,
    /// Account display name.
    account_name: String,
    /// Broker account number.
    account_number: Option<String>,
    /// Long or short.
    direction: PositionSide,
    /// Date of the first opening fill.
    opened_date: NaiveDate,
    /// Date the last open contract was resolved.
    closed_date: Option<NaiveDate>,
    /// Lifecycle state.
    status: LegStatus,
    /// Matched lots.
    lots: Vec<MatchedLegLot>,
}

impl MatchedLeg {
    /// Start a new open leg.
    #[must_use]
    pub fn new(
        contract: ContractKey,
        account_name: impl Into<String>,
        account_number: Option<String>,
        direction: PositionSide,
        opened_date: NaiveDate,
    ) -> Self {
        Self {
            contract,
            account_name: account_name.into(),
            account_number,
            direction,
            opened_date,
            closed_date: None,
            status: LegStatus::Open,
            lots: Vec::new(),
        }
    }

    /// Append a lot.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::InvariantViolation`] if the leg is closed or the
    /// lot's direction differs from the leg's.
    pub fn push_lot(&mut self, lot: MatchedLegLot) -> Result<(), MatchingError> {
        if self.status == LegStatus::Closed {
            return Err(self.violation("cannot add a lot to a closed leg"));
        }
        if lot.direction() != self.direction {
            return Err(self.violation(format!(
                "{} lot on a {} leg",
                lot.direction(),
                self.direction
            )));
        }
        self.lots.push(lot);
        Ok(())
    }

    /// Transition OPEN -> CLOSED.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::InvariantViolation`] if the leg is already
    /// closed or still holds open lots.
    pub fn close(&mut self, closed_date: NaiveDate) -> Result<(), MatchingError> {
        if self.status == LegStatus::Closed {
            return Err(self.violation("leg is already closed"));
        }
        if self.lots.iter().any(MatchedLegLot::is_open) {
            return Err(self.violation("leg still has open lots"));
        }
        self.closed_date = Some(closed_date);
        self.status = LegStatus::Closed;
        Ok(())
    }

    fn violation(&self, message: impl Into<String>) -> MatchingError {
        MatchingError::InvariantViolation {
            leg_id: self.leg_id(),
            message: message.into(),
        }
    }

    /// Get the contract key.
    #[must_use]
    pub const fn contract(&self) -> &ContractKey {
        &self.contract
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

    /// Get the direction.
    #[must_use]
    pub const fn direction(&self) -> PositionSide {
        self.direction
    }

    /// Get the opening date.
    #[must_use]
    pub const fn opened_date(&self) -> NaiveDate {
        self.opened_date
    }

    /// Get the closing date.
    #[must_use]
    pub const fn closed_date(&self) -> Option<NaiveDate> {
        self.closed_date
    }

    /// Get the status.
    #[must_use]
    pub const fn status(&self) -> LegStatus {
        self.status
    }

    /// Get the lots.
    #[must_use]
    pub fn lots(&self) -> &[MatchedLegLot] {
        &self.lots
    }

    /// Check if the leg is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == LegStatus::Open
    }

    /// Contract identifier, e.g. `TSLA-2025-02-21-C-50000`.
    #[must_use]
    pub fn leg_id(&self) -> String {
        self.contract.leg_id()
    }

    /// Contracts still open.
    #[must_use]
    pub fn open_quantity(&self) -> u64 {
        self.open_lots().map(|lot| u64::from(lot.quantity())).sum()
    }

    /// Signed open contracts: long positive, short negative.
    #[must_use]
    pub fn net_contracts(&self) -> i64 {
        let open: i64 = self.open_lots().map(|lot| i64::from(lot.quantity())).sum();
        open * self.direction.sign()
    }

    /// Realized P/L after fees over resolved lots.
    #[must_use]
    pub fn realized_pnl(&self) -> Money {
        self.lots
            .iter()
            .filter_map(MatchedLegLot::realized_pnl)
            .sum()
    }

    /// Opening cash flow of the lots still open.
    #[must_use]
    pub fn open_premium(&self) -> Money {
        self.open_lots().map(MatchedLegLot::open_premium).sum()
    }

    /// Fees attributed to the leg.
    #[must_use]
    pub fn total_fees(&self) -> Money {
        self.lots.iter().map(MatchedLegLot::total_fees).sum()
    }

    /// Days from `as_of` until the contract expires, never negative.
    #[must_use]
    pub fn days_to_expiration(&self, as_of: NaiveDate) -> i64 {
        self.contract.days_to_expiration(as_of)
    }

    fn open_lots(&self) -> impl Iterator<Item = &MatchedLegLot> {
        self.lots.iter().filter(|lot| lot.is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::leg_matching::value_objects::LotResolution;
    use crate::domain::option_transaction::OptionType;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn leg() -> MatchedLeg {
        MatchedLeg::new(
            ContractKey::new("TSLA", dec!(500), date(31), OptionType::Call),
            "Brokerage",
            Some("X123".to_string()),
            PositionSide::Short,
            date(2),
        )
    }

    fn short_lot(quantity: u32, premium: rust_decimal::Decimal) -> MatchedLegLot {
        MatchedLegLot::open(
            PositionSide::Short,
            quantity,
            date(2),
            Money::new(premium),
            Money::new(dec!(0.02)),
        )
    }

    #[test]
    fn summaries_over_mixed_lots() {
        let mut leg = leg();
        leg.push_lot(short_lot(1, dec!(300)).resolved(
            date(10),
            Money::new(dec!(-100)),
            Money::new(dec!(0.02)),
            LotResolution::ClosedByTrade,
        ))
        .unwrap();
        leg.push_lot(short_lot(2, dec!(600))).unwrap();

        assert_eq!(leg.open_quantity(), 2);
        assert_eq!(leg.net_contracts(), -2);
        assert_eq!(leg.realized_pnl(), Money::new(dec!(199.96)));
        assert_eq!(leg.open_premium(), Money::new(dec!(600)));
        assert_eq!(leg.total_fees(), Money::new(dec!(0.06)));
        assert_eq!(leg.leg_id(), "TSLA-2025-01-31-C-50000");
        assert_eq!(leg.account_number(), Some("X123"));
        assert_eq!(leg.days_to_expiration(date(21)), 10);
        let march = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(leg.days_to_expiration(march), 0);
    }

    #[test]
    fn close_transitions_once() {
        let mut leg = leg();
        let lot = short_lot(1, dec!(300));
        let zero = Money::ZERO;
        let expired = lot.resolved(date(17), zero, zero, LotResolution::Expired);
        leg.push_lot(expired).unwrap();

        leg.close(date(17)).unwrap();
        assert_eq!(leg.status(), LegStatus::Closed);
        assert_eq!(leg.closed_date(), Some(date(17)));

        assert!(matches!(
            leg.close(date(18)),
            Err(MatchingError::InvariantViolation { .. })
        ));
        assert!(leg.push_lot(short_lot(1, dec!(100))).is_err());
    }

    #[test]
    fn cannot_close_with_open_lots() {
        let mut leg = leg();
        leg.push_lot(short_lot(1, dec!(300))).unwrap();
        assert!(leg.close(date(3)).is_err());
        assert!(leg.is_open());
    }

    #[test]
    fn rejects_lot_of_other_direction() {
        let mut leg = leg();
        let premium = Money::new(dec!(-50));
        let long = MatchedLegLot::open(PositionSide::Long, 1, date(2), premium, Money::ZERO);
        assert!(leg.push_lot(long).is_err());
    }
}

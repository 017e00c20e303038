//! FIFO Leg Matcher
//!
//! Replays a transaction stream in chronological order and pairs opening
//! fills with the closes, expirations and assignments that resolve them.
//! Each (account, contract) partition keeps one queue of open lots; resolving
//! events always consume the oldest lot first.

use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;

use super::FillRemainder;
use crate::domain::leg_matching::aggregate::MatchedLeg;
use crate::domain::leg_matching::errors::MatchingError;
use crate::domain::leg_matching::value_objects::{LotResolution, MatchedLegLot};
use crate::domain::option_transaction::{
    ActionCode, ContractKey, NormalizedOptionTransaction, PositionSide, chronological_order,
    validate_transactions,
};
use crate::domain::shared::Money;

/// Reconstruct legs from a transaction slice.
///
/// The whole slice is validated first. Legs come back ordered by opening
/// date, ties broken by the input position of each leg's first opening fill.
///
/// # Errors
///
/// Returns [`MatchingError`] on invalid input or when the stream resolves
/// more contracts than are open. Nothing is clamped and no partial result is
/// returned.
pub fn match_legs(
    transactions: &[NormalizedOptionTransaction],
) -> Result<Vec<MatchedLeg>, MatchingError> {
    validate_transactions(transactions)?;

    let mut matcher = FifoMatcher::default();
    for index in chronological_order(transactions) {
        matcher.apply(index, &transactions[index])?;
    }
    let legs = matcher.finish()?;

    tracing::debug!(
        transactions = transactions.len(),
        legs = legs.len(),
        open_legs = legs.iter().filter(|leg| leg.is_open()).count(),
        "Matched option legs"
    );
    Ok(legs)
}

/// Matching state for one stream.
#[derive(Debug, Default)]
pub struct FifoMatcher {
    books: HashMap<PartitionKey, ContractBook>,
    legs: Vec<LegSlot>,
}

impl FifoMatcher {
    /// Apply one transaction. `index` is its position in the caller's input.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError`] when the event cannot be matched.
    pub fn apply(
        &mut self,
        index: usize,
        txn: &NormalizedOptionTransaction,
    ) -> Result<(), MatchingError> {
        let key = PartitionKey::of(txn);
        let book = self.books.entry(key).or_default();

        if let Some(side) = txn.action_code().opened_side() {
            return book.open(index, txn, side, &mut self.legs);
        }
        let resolution = match txn.action_code() {
            ActionCode::Expire => LotResolution::Expired,
            ActionCode::Assign => LotResolution::Assigned,
            _ => LotResolution::ClosedByTrade,
        };
        book.resolve(txn, resolution, &mut self.legs)
    }

    /// Attach unresolved lots to their open legs and return legs in output order.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::InvariantViolation`] if an open lot has no leg.
    pub fn finish(mut self) -> Result<Vec<MatchedLeg>, MatchingError> {
        for (key, book) in self.books {
            if book.queue.is_empty() {
                continue;
            }
            let slot = book.leg.ok_or_else(|| MatchingError::InvariantViolation {
                leg_id: key.contract.leg_id(),
                message: "open lots without an open leg".to_string(),
            })?;
            for lot in book.queue {
                self.legs[slot].leg.push_lot(lot.into_open_lot())?;
            }
        }

        self.legs
            .sort_by_key(|slot| (slot.leg.opened_date(), slot.first_index));
        Ok(self.legs.into_iter().map(|slot| slot.leg).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PartitionKey {
    account_name: String,
    account_number: Option<String>,
    contract: ContractKey,
}

impl PartitionKey {
    fn of(txn: &NormalizedOptionTransaction) -> Self {
        Self {
            account_name: txn.account_name().to_string(),
            account_number: txn.account_number().map(str::to_string),
            contract: txn.contract_key(),
        }
    }
}

#[derive(Debug)]
struct LegSlot {
    first_index: usize,
    leg: MatchedLeg,
}

#[derive(Debug)]
struct OpenLot {
    direction: PositionSide,
    opened_date: NaiveDate,
    remainder: FillRemainder,
}

impl OpenLot {
    const fn into_open_lot(self) -> MatchedLegLot {
        MatchedLegLot::open(
            self.direction,
            self.remainder.quantity(),
            self.opened_date,
            self.remainder.premium(),
            self.remainder.fee(),
        )
    }
}

/// Open lots and the current leg of one partition.
#[derive(Debug, Default)]
struct ContractBook {
    queue: VecDeque<OpenLot>,
    leg: Option<usize>,
}

impl ContractBook {
    fn open_side(&self) -> Option<PositionSide> {
        self.queue.front().map(|lot| lot.direction)
    }

    fn available(&self) -> u64 {
        self.queue
            .iter()
            .map(|lot| u64::from(lot.remainder.quantity()))
            .sum()
    }

    fn open(
        &mut self,
        index: usize,
        txn: &NormalizedOptionTransaction,
        side: PositionSide,
        legs: &mut Vec<LegSlot>,
    ) -> Result<(), MatchingError> {
        if let Some(open_side) = self.open_side()
            && open_side != side
        {
            return Err(MatchingError::DirectionConflict {
                leg_id: txn.contract_key().leg_id(),
                date: txn.activity_date(),
                action: txn.action_code(),
                open_side,
            });
        }

        if self.leg.is_none() {
            legs.push(LegSlot {
                first_index: index,
                leg: MatchedLeg::new(
                    txn.contract_key(),
                    txn.account_name(),
                    txn.account_number().map(str::to_string),
                    side,
                    txn.activity_date(),
                ),
            });
            self.leg = Some(legs.len() - 1);
        }

        self.queue.push_back(OpenLot {
            direction: side,
            opened_date: txn.activity_date(),
            remainder: FillRemainder::new(txn.quantity(), txn.gross_amount(), txn.fee_amount()),
        });
        Ok(())
    }

    fn resolve(
        &mut self,
        txn: &NormalizedOptionTransaction,
        resolution: LotResolution,
        legs: &mut [LegSlot],
    ) -> Result<(), MatchingError> {
        let leg_id = || txn.contract_key().leg_id();

        let Some(open_side) = self.open_side() else {
            return Err(MatchingError::NoOpenPosition {
                leg_id: leg_id(),
                date: txn.activity_date(),
                action: txn.action_code(),
            });
        };
        if let Some(required) = txn.action_code().closed_side()
            && required != open_side
        {
            return Err(MatchingError::DirectionConflict {
                leg_id: leg_id(),
                date: txn.activity_date(),
                action: txn.action_code(),
                open_side,
            });
        }

        let available = self.available();
        if u64::from(txn.quantity()) > available {
            return Err(MatchingError::OverClose {
                leg_id: leg_id(),
                date: txn.activity_date(),
                action: txn.action_code(),
                requested: txn.quantity(),
                available,
            });
        }

        let slot = self.leg.ok_or_else(|| MatchingError::InvariantViolation {
            leg_id: leg_id(),
            message: "open lots without an open leg".to_string(),
        })?;
        let leg = &mut legs[slot].leg;

        let mut closing = match resolution {
            LotResolution::Expired => FillRemainder::new(txn.quantity(), Money::ZERO, Money::ZERO),
            _ => FillRemainder::new(txn.quantity(), txn.gross_amount(), txn.fee_amount()),
        };
        let closed_on = txn.activity_date();

        while !closing.is_exhausted() {
            let Some(lot) = self.queue.front_mut() else {
                return Err(MatchingError::InvariantViolation {
                    leg_id: leg_id(),
                    message: "queue drained before close was filled".to_string(),
                });
            };
            let matched = lot.remainder.quantity().min(closing.quantity());
            let (open_premium, open_fee) = lot.remainder.take(matched);
            let (close_premium, close_fee) = closing.take(matched);

            let slice = MatchedLegLot::open(
                lot.direction,
                matched,
                lot.opened_date,
                open_premium,
                open_fee,
            )
            .resolved(closed_on, close_premium, close_fee, resolution);
            leg.push_lot(slice)?;

            if lot.remainder.is_exhausted() {
                self.queue.pop_front();
            }
        }

        if self.queue.is_empty() {
            leg.close(closed_on)?;
            self.leg = None;
            tracing::trace!(
                leg_id = %leg.leg_id(),
                closed = %txn.activity_date(),
                "Leg closed"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::leg_matching::value_objects::LegStatus;
    use crate::domain::option_transaction::{OptionType, TransactionError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn call(underlying: &str) -> ContractKey {
        ContractKey::new(underlying, dec!(500), date(2, 21), OptionType::Call)
    }

    fn txn(
        day: u32,
        action: ActionCode,
        quantity: u32,
        premium: Decimal,
        fees: Decimal,
    ) -> NormalizedOptionTransaction {
        NormalizedOptionTransaction::new(date(1, day), call("TSLA"), action, quantity, premium)
            .with_fees(fees)
            .with_account("Brokerage", Some("X123".to_string()))
    }

    #[test]
    fn round_trip_closes_leg() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenSell, 1, dec!(3.00), dec!(0.04)),
            txn(10, ActionCode::CloseBuy, 1, dec!(1.00), dec!(0.04)),
        ])
        .unwrap();

        assert_eq!(legs.len(), 1);
        let leg = &legs[0];
        assert_eq!(leg.status(), LegStatus::Closed);
        assert_eq!(leg.opened_date(), date(1, 2));
        assert_eq!(leg.closed_date(), Some(date(1, 10)));
        assert_eq!(leg.lots().len(), 1);

        let lot = &leg.lots()[0];
        assert_eq!(lot.resolution(), LotResolution::ClosedByTrade);
        assert_eq!(lot.open_premium(), Money::new(dec!(300)));
        assert_eq!(lot.close_premium(), Some(Money::new(dec!(-100))));
        assert_eq!(lot.open_fee_share(), Money::new(dec!(0.04)));
        assert_eq!(lot.close_fee_share(), Money::new(dec!(0.04)));
        assert_eq!(leg.realized_pnl(), Money::new(dec!(199.92)));
    }

    #[test]
    fn close_splits_across_lots_in_fifo_order() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenBuy, 3, dec!(1.00), dec!(0.03)),
            txn(3, ActionCode::OpenBuy, 5, dec!(2.00), dec!(0.05)),
            txn(6, ActionCode::CloseSell, 4, dec!(2.50), dec!(0.08)),
        ])
        .unwrap();

        let leg = &legs[0];
        assert_eq!(leg.status(), LegStatus::Open);
        assert_eq!(leg.direction(), PositionSide::Long);
        let lots = leg.lots();
        assert_eq!(lots.len(), 3);

        assert_eq!(lots[0].quantity(), 3);
        assert_eq!(lots[0].opened_date(), date(1, 2));
        assert_eq!(lots[0].open_premium(), Money::new(dec!(-300)));
        assert_eq!(lots[0].close_premium(), Some(Money::new(dec!(750))));
        assert_eq!(lots[0].close_fee_share(), Money::new(dec!(0.06)));

        assert_eq!(lots[1].quantity(), 1);
        assert_eq!(lots[1].opened_date(), date(1, 3));
        assert_eq!(lots[1].open_premium(), Money::new(dec!(-200)));
        assert_eq!(lots[1].open_fee_share(), Money::new(dec!(0.01)));
        assert_eq!(lots[1].close_premium(), Some(Money::new(dec!(250))));
        assert_eq!(lots[1].close_fee_share(), Money::new(dec!(0.02)));

        assert!(lots[2].is_open());
        assert_eq!(lots[2].quantity(), 4);
        assert_eq!(lots[2].open_premium(), Money::new(dec!(-800)));
        assert_eq!(lots[2].open_fee_share(), Money::new(dec!(0.04)));
        assert_eq!(leg.open_quantity(), 4);
        assert_eq!(leg.net_contracts(), 4);
    }

    #[test]
    fn expiration_resolves_with_zero_close() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenSell, 2, dec!(0.80), dec!(0.02)),
            txn(31, ActionCode::Expire, 2, dec!(0), dec!(0)),
        ])
        .unwrap();
        let lot = &legs[0].lots()[0];
        assert_eq!(lot.resolution(), LotResolution::Expired);
        assert_eq!(lot.close_premium(), Some(Money::ZERO));
        assert_eq!(lot.close_fee_share(), Money::ZERO);
        assert_eq!(legs[0].closed_date(), Some(date(1, 31)));
    }

    #[test]
    fn assignment_closes_either_side() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenBuy, 1, dec!(2.00), dec!(0)),
            txn(20, ActionCode::Assign, 1, dec!(0), dec!(0)),
        ])
        .unwrap();
        assert_eq!(legs[0].lots()[0].resolution(), LotResolution::Assigned);
        assert_eq!(legs[0].status(), LegStatus::Closed);
    }

    #[test]
    fn assignment_pro_rates_premium_and_fee_across_lots() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenSell, 2, dec!(3.00), dec!(0.02)),
            txn(3, ActionCode::OpenSell, 1, dec!(2.00), dec!(0.01)),
            txn(17, ActionCode::Assign, 3, dec!(1.50), dec!(0.10)),
        ])
        .unwrap();

        let leg = &legs[0];
        assert_eq!(leg.status(), LegStatus::Closed);
        assert_eq!(leg.closed_date(), Some(date(1, 17)));
        let lots = leg.lots();
        assert_eq!(lots.len(), 2);

        assert_eq!(lots[0].quantity(), 2);
        assert_eq!(lots[0].resolution(), LotResolution::Assigned);
        assert_eq!(lots[0].close_premium(), Some(Money::new(dec!(300))));
        assert_eq!(lots[0].close_fee_share(), Money::new(dec!(0.07)));

        assert_eq!(lots[1].quantity(), 1);
        assert_eq!(lots[1].resolution(), LotResolution::Assigned);
        assert_eq!(lots[1].close_premium(), Some(Money::new(dec!(150))));
        assert_eq!(lots[1].close_fee_share(), Money::new(dec!(0.03)));
    }

    #[test]
    fn expiration_spans_several_lots() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenBuy, 1, dec!(1.00), dec!(0.01)),
            txn(6, ActionCode::OpenBuy, 2, dec!(0.50), dec!(0.02)),
            txn(31, ActionCode::Expire, 3, dec!(0), dec!(0.05)),
        ])
        .unwrap();

        let leg = &legs[0];
        assert_eq!(leg.status(), LegStatus::Closed);
        assert_eq!(leg.lots().len(), 2);
        for lot in leg.lots() {
            assert_eq!(lot.resolution(), LotResolution::Expired);
            assert_eq!(lot.closed_date(), Some(date(1, 31)));
            assert_eq!(lot.close_premium(), Some(Money::ZERO));
            assert_eq!(lot.close_fee_share(), Money::ZERO);
        }
        assert_eq!(leg.realized_pnl(), Money::new(dec!(-200.03)));
    }

    #[test]
    fn open_quantity_beyond_u32_is_summed_exactly() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenSell, 3_000_000_000, dec!(0.01), dec!(0)),
            txn(3, ActionCode::OpenSell, 3_000_000_000, dec!(0.01), dec!(0)),
            txn(4, ActionCode::CloseBuy, 1, dec!(0.01), dec!(0)),
        ])
        .unwrap();
        assert_eq!(legs[0].open_quantity(), 5_999_999_999);
        assert_eq!(legs[0].net_contracts(), -5_999_999_999);

        let err = match_legs(&[
            txn(2, ActionCode::OpenSell, 3_000_000_000, dec!(0.01), dec!(0)),
            txn(3, ActionCode::OpenSell, 3_000_000_000, dec!(0.01), dec!(0)),
            txn(4, ActionCode::CloseBuy, u32::MAX, dec!(0.01), dec!(0)),
            txn(5, ActionCode::CloseBuy, u32::MAX, dec!(0.01), dec!(0)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            MatchingError::OverClose {
                requested: u32::MAX,
                available: 1_705_032_705,
                ..
            }
        ));
    }

    #[test]
    fn reopening_after_close_starts_new_leg() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenSell, 1, dec!(3.00), dec!(0)),
            txn(5, ActionCode::CloseBuy, 1, dec!(1.00), dec!(0)),
            txn(6, ActionCode::OpenSell, 1, dec!(2.00), dec!(0)),
        ])
        .unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].status(), LegStatus::Closed);
        assert_eq!(legs[1].status(), LegStatus::Open);
        assert_eq!(legs[1].opened_date(), date(1, 6));
    }

    #[test]
    fn same_day_ties_keep_input_order() {
        let legs = match_legs(&[
            txn(2, ActionCode::OpenSell, 1, dec!(3.00), dec!(0)),
            txn(2, ActionCode::CloseBuy, 1, dec!(1.00), dec!(0)),
        ])
        .unwrap();
        assert_eq!(legs[0].status(), LegStatus::Closed);
    }

    #[test]
    fn partitions_by_account_and_contract() {
        let other_account = txn(3, ActionCode::OpenSell, 1, dec!(1.00), dec!(0))
            .with_account("Brokerage", Some("Y999".to_string()));
        let other_contract = NormalizedOptionTransaction::new(
            date(1, 2),
            call("AAPL"),
            ActionCode::OpenBuy,
            1,
            dec!(1.00),
        );
        let legs = match_legs(&[
            other_account,
            txn(3, ActionCode::OpenSell, 1, dec!(1.00), dec!(0)),
            other_contract,
        ])
        .unwrap();

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0].contract().underlying().as_str(), "AAPL");
        assert_eq!(legs[1].account_number(), Some("Y999"));
        assert_eq!(legs[2].account_number(), Some("X123"));
    }

    #[test]
    fn over_close_is_an_error() {
        let err = match_legs(&[
            txn(2, ActionCode::OpenSell, 2, dec!(3.00), dec!(0)),
            txn(5, ActionCode::CloseBuy, 3, dec!(1.00), dec!(0)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            MatchingError::OverClose {
                leg_id: "TSLA-2025-02-21-C-50000".to_string(),
                date: date(1, 5),
                action: ActionCode::CloseBuy,
                requested: 3,
                available: 2,
            }
        );
    }

    #[test]
    fn close_without_open_is_an_error() {
        let err = match_legs(&[txn(5, ActionCode::Expire, 1, dec!(0), dec!(0))]).unwrap_err();
        assert!(matches!(err, MatchingError::NoOpenPosition { .. }));
    }

    #[test]
    fn direction_conflicts_are_errors() {
        let err = match_legs(&[
            txn(2, ActionCode::OpenSell, 1, dec!(3.00), dec!(0)),
            txn(3, ActionCode::CloseSell, 1, dec!(1.00), dec!(0)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            MatchingError::DirectionConflict {
                open_side: PositionSide::Short,
                ..
            }
        ));

        let err = match_legs(&[
            txn(2, ActionCode::OpenSell, 1, dec!(3.00), dec!(0)),
            txn(3, ActionCode::OpenBuy, 1, dec!(1.00), dec!(0)),
        ])
        .unwrap_err();
        assert!(matches!(err, MatchingError::DirectionConflict { .. }));
    }

    #[test]
    fn invalid_input_aborts_before_matching() {
        let err = match_legs(&[
            txn(2, ActionCode::OpenSell, 1, dec!(3.00), dec!(0)),
            txn(3, ActionCode::CloseBuy, 0, dec!(1.00), dec!(0)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            MatchingError::InvalidTransaction(TransactionError::NonPositiveQuantity { index: 1 })
        );
    }

    #[test]
    fn empty_input_yields_no_legs() {
        assert!(match_legs(&[]).unwrap().is_empty());
    }
}

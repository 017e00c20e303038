//! Leg Matching Integration Tests
//!
//! Exercises `match_legs` through the public API: FIFO order, quantity and
//! cash conservation, determinism, and fail-fast faults.

#![allow(clippy::unwrap_used)]

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use premiumflow::{
    ActionCode, ContractKey, LegStatus, LotResolution, MatchedLegLot, MatchingError, Money,
    NormalizedOptionTransaction, OptionType, match_legs,
};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn tsla_call() -> ContractKey {
    ContractKey::new("TSLA", dec!(500), date(2, 21), OptionType::Call)
}

fn txn(
    activity_date: NaiveDate,
    action: ActionCode,
    quantity: u32,
    premium: Decimal,
    fees: Decimal,
) -> NormalizedOptionTransaction {
    NormalizedOptionTransaction::new(activity_date, tsla_call(), action, quantity, premium)
        .with_fees(fees)
}

#[test]
fn tsla_round_trip_produces_one_closed_leg() {
    let legs = match_legs(&[
        txn(date(1, 2), ActionCode::OpenSell, 1, dec!(3.00), dec!(0.04)),
        txn(date(1, 10), ActionCode::CloseBuy, 1, dec!(1.00), dec!(0.04)),
    ])
    .unwrap();

    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].status(), LegStatus::Closed);
    assert_eq!(legs[0].lots().len(), 1);
    assert_eq!(legs[0].lots()[0].resolution(), LotResolution::ClosedByTrade);
    assert_eq!(legs[0].realized_pnl(), Money::new(dec!(199.92)));
}

#[test]
fn fifo_consumes_oldest_lot_first() {
    // Input deliberately out of date order.
    let legs = match_legs(&[
        txn(date(1, 8), ActionCode::CloseBuy, 4, dec!(0.50), dec!(0)),
        txn(date(1, 3), ActionCode::OpenSell, 5, dec!(2.00), dec!(0)),
        txn(date(1, 2), ActionCode::OpenSell, 3, dec!(1.00), dec!(0)),
    ])
    .unwrap();

    let lots = legs[0].lots();
    assert_eq!(lots[0].opened_date(), date(1, 2));
    assert_eq!(lots[0].quantity(), 3);
    assert_eq!(lots[1].opened_date(), date(1, 3));
    assert_eq!(lots[1].quantity(), 1);
    assert!(lots[2].is_open());
    assert_eq!(lots[2].quantity(), 4);
    assert_eq!(legs[0].open_quantity(), 4);
    assert_eq!(legs[0].net_contracts(), -4);
}

#[test]
fn matching_is_deterministic() {
    let txns = [
        txn(date(1, 2), ActionCode::OpenBuy, 2, dec!(1.10), dec!(0.02)),
        txn(date(1, 2), ActionCode::CloseSell, 1, dec!(1.30), dec!(0.01)),
        txn(date(1, 5), ActionCode::OpenBuy, 1, dec!(0.90), dec!(0.01)),
        txn(date(1, 9), ActionCode::Expire, 2, dec!(0), dec!(0)),
    ];
    assert_eq!(match_legs(&txns).unwrap(), match_legs(&txns).unwrap());
}

#[test]
fn over_close_aborts_without_partial_result() {
    let result = match_legs(&[
        txn(date(1, 2), ActionCode::OpenSell, 1, dec!(3.00), dec!(0)),
        txn(date(1, 5), ActionCode::CloseBuy, 1, dec!(1.00), dec!(0)),
        txn(date(1, 6), ActionCode::Assign, 1, dec!(0), dec!(0)),
    ]);
    assert!(matches!(result, Err(MatchingError::NoOpenPosition { .. })));

    let result = match_legs(&[
        txn(date(1, 2), ActionCode::OpenSell, 2, dec!(3.00), dec!(0)),
        txn(date(1, 5), ActionCode::Expire, 5, dec!(0), dec!(0)),
    ]);
    assert!(matches!(
        result,
        Err(MatchingError::OverClose {
            requested: 5,
            available: 2,
            ..
        })
    ));
}

#[test]
fn assignment_and_expiration_split_across_lots() {
    let assigned = match_legs(&[
        txn(date(1, 2), ActionCode::OpenSell, 2, dec!(3.00), dec!(0)),
        txn(date(1, 3), ActionCode::OpenSell, 1, dec!(2.00), dec!(0)),
        txn(date(1, 17), ActionCode::Assign, 3, dec!(1.50), dec!(0.10)),
    ])
    .unwrap();
    let lots = assigned[0].lots();
    let closes: Vec<_> = lots.iter().map(MatchedLegLot::close_premium).collect();
    let fees: Vec<_> = lots.iter().map(MatchedLegLot::close_fee_share).collect();
    assert_eq!(
        closes,
        [Some(Money::new(dec!(300))), Some(Money::new(dec!(150)))]
    );
    assert_eq!(fees, [Money::new(dec!(0.07)), Money::new(dec!(0.03))]);
    for lot in lots {
        assert_eq!(lot.resolution(), LotResolution::Assigned);
    }

    let expired = match_legs(&[
        txn(date(1, 2), ActionCode::OpenSell, 2, dec!(3.00), dec!(0)),
        txn(date(1, 3), ActionCode::OpenSell, 1, dec!(2.00), dec!(0)),
        txn(date(2, 21), ActionCode::Expire, 3, dec!(0), dec!(0.10)),
    ])
    .unwrap();
    let lots = expired[0].lots();
    assert_eq!(lots.len(), 2);
    for lot in lots {
        assert_eq!(lot.resolution(), LotResolution::Expired);
        assert_eq!(lot.close_premium(), Some(Money::ZERO));
        assert_eq!(lot.close_fee_share(), Money::ZERO);
    }
    assert_eq!(expired[0].realized_pnl(), Money::new(dec!(800)));
}

#[test]
fn legs_serialize_with_screaming_enums() {
    let open = txn(date(1, 2), ActionCode::OpenSell, 1, dec!(3.00), dec!(0));
    let legs = match_legs(&[open]).unwrap();
    let json = serde_json::to_value(&legs[0]).unwrap();
    assert_eq!(json["status"], "OPEN");
    assert_eq!(json["direction"], "SHORT");
    assert_eq!(json["lots"][0]["resolution"], "OPEN");
}

/// One step of a generated stream: open or close `quantity` at `cents` per share.
#[derive(Debug, Clone)]
struct Step {
    open: bool,
    quantity: u32,
    cents: i64,
    fee_cents: i64,
}

impl Step {
    const fn from_parts((open, quantity, cents, fee_cents): (bool, u32, i64, i64)) -> Self {
        Self {
            open,
            quantity,
            cents,
            fee_cents,
        }
    }
}

fn step() -> impl Strategy<Value = Step> {
    let parts = (any::<bool>(), 1u32..6, 1i64..2_000, 0i64..200);
    parts.prop_map(Step::from_parts)
}

/// Turn steps into a valid short-premium stream; closes never exceed what is open.
fn build_stream(steps: &[Step]) -> Vec<NormalizedOptionTransaction> {
    let mut open = 0u32;
    let mut txns = Vec::new();
    for (i, s) in steps.iter().enumerate() {
        let day = date(1, 1).checked_add_days(Days::new(i as u64)).unwrap();
        let premium = Decimal::new(s.cents, 2);
        let fees = Decimal::new(s.fee_cents, 2);
        if s.open || open == 0 {
            open += s.quantity;
            txns.push(txn(day, ActionCode::OpenSell, s.quantity, premium, fees));
        } else {
            let quantity = s.quantity.min(open);
            open -= quantity;
            txns.push(txn(day, ActionCode::CloseBuy, quantity, premium, fees));
        }
    }
    txns
}

proptest! {
    #[test]
    fn quantity_and_cash_are_conserved(steps in proptest::collection::vec(step(), 1..30)) {
        let txns = build_stream(&steps);
        let legs = match_legs(&txns).unwrap();
        let lots: Vec<_> = legs.iter().flat_map(|leg| leg.lots().iter()).collect();

        let opened: u32 = txns
            .iter()
            .filter(|t| t.action_code().is_opening())
            .map(NormalizedOptionTransaction::quantity)
            .sum();
        let closed: u32 = txns
            .iter()
            .filter(|t| t.action_code().is_closing())
            .map(NormalizedOptionTransaction::quantity)
            .sum();
        let lot_quantity: u32 = lots.iter().map(|lot| lot.quantity()).sum();
        let resolved_quantity: u32 = lots
            .iter()
            .filter(|lot| !lot.is_open())
            .map(|lot| lot.quantity())
            .sum();
        prop_assert_eq!(lot_quantity, opened);
        prop_assert_eq!(resolved_quantity, closed);

        let open_cash: Money = txns
            .iter()
            .filter(|t| t.action_code().is_opening())
            .map(NormalizedOptionTransaction::gross_amount)
            .sum();
        let close_cash: Money = txns
            .iter()
            .filter(|t| t.action_code().is_closing())
            .map(NormalizedOptionTransaction::gross_amount)
            .sum();
        let fees: Money = txns
            .iter()
            .map(NormalizedOptionTransaction::fee_amount)
            .sum();

        prop_assert_eq!(lots.iter().map(|lot| lot.open_premium()).sum::<Money>(), open_cash);
        prop_assert_eq!(
            lots.iter().filter_map(|lot| lot.close_premium()).sum::<Money>(),
            close_cash
        );
        prop_assert_eq!(lots.iter().map(|lot| lot.total_fees()).sum::<Money>(), fees);

        // At most one leg per contract is still open, and it holds every open contract.
        let open_legs: Vec<_> = legs.iter().filter(|leg| leg.is_open()).collect();
        prop_assert!(open_legs.len() <= 1);
        let still_open: u64 = open_legs.iter().map(|leg| leg.open_quantity()).sum();
        prop_assert_eq!(still_open, u64::from(opened - closed));
    }

    #[test]
    fn closed_legs_have_no_open_lots(steps in proptest::collection::vec(step(), 1..30)) {
        let legs = match_legs(&build_stream(&steps)).unwrap();
        for leg in legs.iter().filter(|leg| !leg.is_open()) {
            prop_assert!(leg.lots().iter().all(|lot| !lot.is_open()));
            prop_assert!(leg.closed_date().is_some());
        }
        for pair in legs.windows(2) {
            prop_assert!(pair[0].opened_date() <= pair[1].opened_date());
        }
    }
}

//! Cash-Flow P/L Aggregator
//!
//! Buckets each transaction's signed cash effect and fee by activity date.
//! Cash figures come straight from transactions; matched legs, when given,
//! add lot-based realized P/L and the premium still at risk.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::cash_flow::errors::ReportError;
use crate::domain::cash_flow::value_objects::{
    AssignmentHandling, CashFlowPnlReport, PeriodKey, PeriodMetrics, PeriodType, ReportOptions,
};
use crate::domain::leg_matching::{MatchedLeg, MatchedLegLot};
use crate::domain::option_transaction::{NormalizedOptionTransaction, validate_transactions};

/// Build a report over every transaction.
///
/// # Errors
///
/// Returns [`ReportError::InvalidTransaction`] if any transaction is invalid.
pub fn generate_cash_flow_pnl_report(
    transactions: &[NormalizedOptionTransaction],
    period_type: PeriodType,
    assignment_handling: AssignmentHandling,
) -> Result<CashFlowPnlReport, ReportError> {
    generate_cash_flow_pnl_report_with_options(
        transactions,
        period_type,
        assignment_handling,
        &ReportOptions::default(),
    )
}

/// Build a report over the transactions passing `options`.
///
/// The whole slice is validated, including transactions the filters drop.
///
/// # Errors
///
/// Returns [`ReportError`] on invalid input or an inverted date range.
pub fn generate_cash_flow_pnl_report_with_options(
    transactions: &[NormalizedOptionTransaction],
    period_type: PeriodType,
    assignment_handling: AssignmentHandling,
    options: &ReportOptions,
) -> Result<CashFlowPnlReport, ReportError> {
    generate_cash_flow_pnl_report_with_legs(
        transactions,
        &[],
        period_type,
        assignment_handling,
        options,
    )
}

/// Build a report that also carries realized P/L and exposure from `legs`.
///
/// `legs` are the matched legs of the same transactions, usually the output
/// of [`match_legs`](crate::domain::leg_matching::match_legs) over the whole
/// slice. Resolved lots land in the period of their closing date when it is
/// inside the window. Lots still open when the window ends land in the
/// period of their opening date, or of `since` if they opened earlier.
///
/// # Errors
///
/// Returns [`ReportError`] on invalid input or an inverted date range.
pub fn generate_cash_flow_pnl_report_with_legs(
    transactions: &[NormalizedOptionTransaction],
    legs: &[MatchedLeg],
    period_type: PeriodType,
    assignment_handling: AssignmentHandling,
    options: &ReportOptions,
) -> Result<CashFlowPnlReport, ReportError> {
    validate_transactions(transactions)?;
    options.validate()?;

    let in_scope: Vec<&NormalizedOptionTransaction> = transactions
        .iter()
        .filter(|txn| options.includes(txn))
        .collect();

    let mut buckets: BTreeMap<PeriodKey, PeriodMetrics> = BTreeMap::new();
    for txn in &in_scope {
        bucket(&mut buckets, period_type, txn.activity_date())
            .record(txn, assignment_handling);
    }

    for leg in legs {
        if !options.includes_underlying(leg.contract().underlying()) {
            continue;
        }
        for lot in leg.lots() {
            if let Some(closed) = lot.closed_date().filter(|&day| options.contains_date(day)) {
                bucket(&mut buckets, period_type, closed)
                    .record_realized(lot, assignment_handling);
            }
            if let Some(opened) = exposure_date(lot, options) {
                bucket(&mut buckets, period_type, opened)
                    .record_exposure(lot);
            }
        }
    }

    let mut report = CashFlowPnlReport::new(
        period_type,
        assignment_handling,
        buckets.into_values().collect(),
    );
    if let Some((name, number)) = shared_account(&in_scope) {
        report = report.with_account(name, number.map(str::to_string));
    }

    tracing::debug!(
        period_type = %period_type,
        assignment_handling = %assignment_handling,
        periods = report.periods().len(),
        transactions = report.totals().transaction_count(),
        net_realized_pnl = %report.totals().net_realized_pnl(),
        realized_pnl_net = %report.totals().realized_pnl_net(),
        "Generated cash flow report"
    );
    Ok(report)
}

fn bucket(
    buckets: &mut BTreeMap<PeriodKey, PeriodMetrics>,
    period_type: PeriodType,
    date: NaiveDate,
) -> &mut PeriodMetrics {
    let key = PeriodKey::for_date(period_type, date);
    buckets
        .entry(key)
        .or_insert_with(|| PeriodMetrics::empty(key))
}

/// Date whose period carries the lot's exposure, if it is still at risk
/// when the window ends.
fn exposure_date(lot: &MatchedLegLot, options: &ReportOptions) -> Option<NaiveDate> {
    let opened = lot.opened_date();
    let open_at_end = match (lot.closed_date(), options.until) {
        (None, _) => true,
        (Some(closed), Some(until)) => closed > until,
        (Some(_), None) => false,
    };
    if !open_at_end || options.until.is_some_and(|until| opened > until) {
        return None;
    }
    Some(options.since.map_or(opened, |since| opened.max(since)))
}

fn shared_account<'a>(
    transactions: &[&'a NormalizedOptionTransaction],
) -> Option<(&'a str, Option<&'a str>)> {
    let (first, rest) = transactions.split_first()?;
    let account = (first.account_name(), first.account_number());
    if account.0.is_empty() {
        return None;
    }
    rest.iter()
        .all(|txn| (txn.account_name(), txn.account_number()) == account)
        .then_some(account)
}

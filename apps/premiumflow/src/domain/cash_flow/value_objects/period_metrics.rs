//! Period Metrics Value Object

use serde::Serialize;

use super::{AssignmentHandling, PeriodKey};
use crate::domain::leg_matching::{LotResolution, MatchedLegLot};
use crate::domain::option_transaction::NormalizedOptionTransaction;
use crate::domain::shared::Money;

/// Cash flow and realized P/L for one bucket.
///
/// `credits`, `debits` and the fee fields are non-negative magnitudes.
/// `net_realized_pnl` is always `credits - debits - fees`.
///
/// The `realized_*`, `assignment_realized_*` and `unrealized_exposure` fields
/// come from matched lots and stay zero when a report is built from
/// transactions alone. Profit and loss fields are magnitudes; the matching
/// `realized_pnl_*` field is their signed difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodMetrics {
    /// Bucket identity.
    period_key: PeriodKey,
    /// Human-readable bucket name.
    period_label: String,
    /// Cash received.
    credits: Money,
    /// Cash paid.
    debits: Money,
    /// Credits minus debits, before fees.
    net_cash_flow: Money,
    /// All counted fees.
    fees: Money,
    /// Fees on opening trades.
    opening_fees: Money,
    /// Fees on closes, expirations and assignments.
    closing_fees: Money,
    /// Assignment cash after fees, whatever the handling mode.
    assignment_premium_after_fees: Money,
    /// Credits minus debits minus fees.
    net_realized_pnl: Money,
    /// Winning lots closed here, before fees.
    realized_profits_gross: Money,
    /// Losing lots closed here, before fees.
    realized_losses_gross: Money,
    /// Profits minus losses, before fees.
    realized_pnl_gross: Money,
    /// Winning lots closed here, after fees.
    realized_profits_net: Money,
    /// Losing lots closed here, after fees.
    realized_losses_net: Money,
    /// Profits minus losses, after fees.
    realized_pnl_net: Money,
    /// Lot P/L from assignments before fees, whatever the handling mode.
    assignment_realized_gross: Money,
    /// Lot P/L from assignments after fees, whatever the handling mode.
    assignment_realized_net: Money,
    /// Opening premium of lots still open at the end of the window.
    unrealized_exposure: Money,
    /// Transactions bucketed here.
    transaction_count: usize,
}

impl PeriodMetrics {
    /// An empty bucket.
    #[must_use]
    pub fn empty(period_key: PeriodKey) -> Self {
        Self {
            period_label: period_key.label(),
            period_key,
            credits: Money::ZERO,
            debits: Money::ZERO,
            net_cash_flow: Money::ZERO,
            fees: Money::ZERO,
            opening_fees: Money::ZERO,
            closing_fees: Money::ZERO,
            assignment_premium_after_fees: Money::ZERO,
            net_realized_pnl: Money::ZERO,
            realized_profits_gross: Money::ZERO,
            realized_losses_gross: Money::ZERO,
            realized_pnl_gross: Money::ZERO,
            realized_profits_net: Money::ZERO,
            realized_losses_net: Money::ZERO,
            realized_pnl_net: Money::ZERO,
            assignment_realized_gross: Money::ZERO,
            assignment_realized_net: Money::ZERO,
            unrealized_exposure: Money::ZERO,
            transaction_count: 0,
        }
    }

    /// Grand total over `periods`.
    #[must_use]
    pub fn total<'a>(periods: impl IntoIterator<Item = &'a Self>) -> Self {
        periods
            .into_iter()
            .fold(Self::empty(PeriodKey::Total), |mut total, period| {
                total.absorb(period);
                total
            })
    }

    /// Add one transaction's cash effect.
    pub fn record(&mut self, txn: &NormalizedOptionTransaction, handling: AssignmentHandling) {
        self.transaction_count += 1;

        let gross = txn.gross_amount();
        let fee = txn.fee_amount();
        if txn.action_code().is_assignment() {
            self.assignment_premium_after_fees += txn.net_amount();
            if !handling.includes_assignments() {
                return;
            }
        }

        if gross.is_positive() {
            self.credits += gross;
        } else if gross.is_negative() {
            self.debits += gross.abs();
        }
        self.fees += fee;
        if txn.action_code().is_opening() {
            self.opening_fees += fee;
        } else {
            self.closing_fees += fee;
        }
        self.refresh_nets();
    }

    /// Add the realized P/L of one resolved lot. Open lots are ignored.
    pub fn record_realized(&mut self, lot: &MatchedLegLot, handling: AssignmentHandling) {
        let (Some(gross), Some(net)) = (lot.realized_pnl_gross(), lot.realized_pnl()) else {
            return;
        };

        if lot.resolution() == LotResolution::Assigned {
            self.assignment_realized_gross += gross;
            self.assignment_realized_net += net;
            if !handling.includes_assignments() {
                return;
            }
        }

        if gross.is_negative() {
            self.realized_losses_gross += gross.abs();
        } else {
            self.realized_profits_gross += gross;
        }
        if net.is_negative() {
            self.realized_losses_net += net.abs();
        } else {
            self.realized_profits_net += net;
        }
        self.refresh_nets();
    }

    /// Add the opening premium of a lot still at risk.
    pub fn record_exposure(&mut self, lot: &MatchedLegLot) {
        self.unrealized_exposure += lot.open_premium();
    }

    fn absorb(&mut self, other: &Self) {
        self.credits += other.credits;
        self.debits += other.debits;
        self.fees += other.fees;
        self.opening_fees += other.opening_fees;
        self.closing_fees += other.closing_fees;
        self.assignment_premium_after_fees += other.assignment_premium_after_fees;
        self.realized_profits_gross += other.realized_profits_gross;
        self.realized_losses_gross += other.realized_losses_gross;
        self.realized_profits_net += other.realized_profits_net;
        self.realized_losses_net += other.realized_losses_net;
        self.assignment_realized_gross += other.assignment_realized_gross;
        self.assignment_realized_net += other.assignment_realized_net;
        self.unrealized_exposure += other.unrealized_exposure;
        self.transaction_count += other.transaction_count;
        self.refresh_nets();
    }

    fn refresh_nets(&mut self) {
        self.net_cash_flow = self.credits - self.debits;
        self.net_realized_pnl = self.net_cash_flow - self.fees;
        self.realized_pnl_gross = self.realized_profits_gross - self.realized_losses_gross;
        self.realized_pnl_net = self.realized_profits_net - self.realized_losses_net;
    }

    /// Get the bucket key.
    #[must_use]
    pub const fn period_key(&self) -> PeriodKey {
        self.period_key
    }

    /// Get the bucket label.
    #[must_use]
    pub fn period_label(&self) -> &str {
        &self.period_label
    }

    /// Get credits.
    #[must_use]
    pub const fn credits(&self) -> Money {
        self.credits
    }

    /// Get debits.
    #[must_use]
    pub const fn debits(&self) -> Money {
        self.debits
    }

    /// Get credits minus debits.
    #[must_use]
    pub const fn net_cash_flow(&self) -> Money {
        self.net_cash_flow
    }

    /// Get fees.
    #[must_use]
    pub const fn fees(&self) -> Money {
        self.fees
    }

    /// Get opening fees.
    #[must_use]
    pub const fn opening_fees(&self) -> Money {
        self.opening_fees
    }

    /// Get closing fees.
    #[must_use]
    pub const fn closing_fees(&self) -> Money {
        self.closing_fees
    }

    /// Get assignment cash after fees.
    #[must_use]
    pub const fn assignment_premium_after_fees(&self) -> Money {
        self.assignment_premium_after_fees
    }

    /// Get net realized P/L.
    #[must_use]
    pub const fn net_realized_pnl(&self) -> Money {
        self.net_realized_pnl
    }

    /// Get realized profits before fees.
    #[must_use]
    pub const fn realized_profits_gross(&self) -> Money {
        self.realized_profits_gross
    }

    /// Get realized losses before fees.
    #[must_use]
    pub const fn realized_losses_gross(&self) -> Money {
        self.realized_losses_gross
    }

    /// Get lot-based realized P/L before fees.
    #[must_use]
    pub const fn realized_pnl_gross(&self) -> Money {
        self.realized_pnl_gross
    }

    /// Get realized profits after fees.
    #[must_use]
    pub const fn realized_profits_net(&self) -> Money {
        self.realized_profits_net
    }

    /// Get realized losses after fees.
    #[must_use]
    pub const fn realized_losses_net(&self) -> Money {
        self.realized_losses_net
    }

    /// Get lot-based realized P/L after fees.
    #[must_use]
    pub const fn realized_pnl_net(&self) -> Money {
        self.realized_pnl_net
    }

    /// Get assignment-driven lot P/L before fees.
    #[must_use]
    pub const fn assignment_realized_gross(&self) -> Money {
        self.assignment_realized_gross
    }

    /// Get assignment-driven lot P/L after fees.
    #[must_use]
    pub const fn assignment_realized_net(&self) -> Money {
        self.assignment_realized_net
    }

    /// Get the opening premium still at risk.
    #[must_use]
    pub const fn unrealized_exposure(&self) -> Money {
        self.unrealized_exposure
    }

    /// Get the transaction count.
    #[must_use]
    pub const fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

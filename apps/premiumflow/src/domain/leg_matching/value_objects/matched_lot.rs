//! Matched Leg Lot Value Object

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LotResolution;
use crate::domain::option_transaction::PositionSide;
use crate::domain::shared::Money;

/// A slice of an opening fill paired with the event that resolved it.
///
/// All amounts are signed dollar cash flows (credit positive). Fee shares are
/// the lot's pro-rated portion of the originating fills' fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedLegLot {
    /// Long or short.
    direction: PositionSide,
    /// Contracts in this slice.
    quantity: u32,
    /// Date of the opening fill.
    opened_date: NaiveDate,
    /// Date of the resolving event.
    closed_date: Option<NaiveDate>,
    /// Opening cash flow for this slice.
    open_premium: Money,
    /// Resolving cash flow for this slice.
    close_premium: Option<Money>,
    /// Opening fee share.
    open_fee_share: Money,
    /// Closing fee share.
    close_fee_share: Money,
    /// How the slice was resolved.
    resolution: LotResolution,
}

impl MatchedLegLot {
    /// A slice still open at the end of the stream.
    #[must_use]
    pub const fn open(
        direction: PositionSide,
        quantity: u32,
        opened_date: NaiveDate,
        open_premium: Money,
        open_fee_share: Money,
    ) -> Self {
        Self {
            direction,
            quantity,
            opened_date,
            closed_date: None,
            open_premium,
            close_premium: None,
            open_fee_share,
            close_fee_share: Money::ZERO,
            resolution: LotResolution::Open,
        }
    }

    /// Resolve this slice.
    #[must_use]
    pub const fn resolved(
        self,
        closed_date: NaiveDate,
        close_premium: Money,
        close_fee_share: Money,
        resolution: LotResolution,
    ) -> Self {
        Self {
            closed_date: Some(closed_date),
            close_premium: Some(close_premium),
            close_fee_share,
            resolution,
            ..self
        }
    }

    /// Get the direction.
    #[must_use]
    pub const fn direction(&self) -> PositionSide {
        self.direction
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Get the opening date.
    #[must_use]
    pub const fn opened_date(&self) -> NaiveDate {
        self.opened_date
    }

    /// Get the resolving date.
    #[must_use]
    pub const fn closed_date(&self) -> Option<NaiveDate> {
        self.closed_date
    }

    /// Get the opening cash flow.
    #[must_use]
    pub const fn open_premium(&self) -> Money {
        self.open_premium
    }

    /// Get the resolving cash flow.
    #[must_use]
    pub const fn close_premium(&self) -> Option<Money> {
        self.close_premium
    }

    /// Get the opening fee share.
    #[must_use]
    pub const fn open_fee_share(&self) -> Money {
        self.open_fee_share
    }

    /// Get the closing fee share.
    #[must_use]
    pub const fn close_fee_share(&self) -> Money {
        self.close_fee_share
    }

    /// Get the resolution.
    #[must_use]
    pub const fn resolution(&self) -> LotResolution {
        self.resolution
    }

    /// Check if the slice is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.resolution, LotResolution::Open)
    }

    /// Opening plus closing fee share.
    #[must_use]
    pub fn total_fees(&self) -> Money {
        self.open_fee_share + self.close_fee_share
    }

    /// Realized P/L before fees; `None` while the slice is open.
    #[must_use]
    pub fn realized_pnl_gross(&self) -> Option<Money> {
        self.close_premium.map(|close| self.open_premium + close)
    }

    /// Realized P/L after fees; `None` while the slice is open.
    #[must_use]
    pub fn realized_pnl(&self) -> Option<Money> {
        self.realized_pnl_gross().map(|gross| gross - self.total_fees())
    }
}

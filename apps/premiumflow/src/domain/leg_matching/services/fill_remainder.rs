//! Unconsumed part of a fill.

use crate::domain::shared::Money;

/// Quantity, premium and fee of a fill not yet assigned to a lot.
///
/// Each `take` pro-rates the remaining amounts to cents; the final take
/// receives whatever is left, so the slices of one fill always sum exactly to
/// the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillRemainder {
    quantity: u32,
    premium: Money,
    fee: Money,
}

impl FillRemainder {
    /// Wrap a whole fill.
    #[must_use]
    pub const fn new(quantity: u32, premium: Money, fee: Money) -> Self {
        Self {
            quantity,
            premium,
            fee,
        }
    }

    /// Contracts not yet consumed.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Premium not yet consumed.
    #[must_use]
    pub const fn premium(&self) -> Money {
        self.premium
    }

    /// Fee not yet consumed.
    #[must_use]
    pub const fn fee(&self) -> Money {
        self.fee
    }

    /// Check if nothing is left.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.quantity == 0
    }

    /// Consume `quantity` contracts, returning their premium and fee shares.
    ///
    /// `quantity` is capped at what remains.
    pub fn take(&mut self, quantity: u32) -> (Money, Money) {
        let quantity = quantity.min(self.quantity);
        let premium = self.premium.pro_rata(quantity, self.quantity);
        let fee = self.fee.pro_rata(quantity, self.quantity);
        self.quantity -= quantity;
        self.premium -= premium;
        self.fee -= fee;
        (premium, fee)
    }
}

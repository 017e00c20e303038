//! Action Code Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PositionSide;
use crate::domain::option_transaction::errors::TransactionError;

/// What a normalized transaction did to the position.
///
/// Broker trans codes (`STO`, `BTC`, `OASGN`, ...) are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCode {
    /// Sell to open (writes a short position).
    #[serde(alias = "STO")]
    OpenSell,
    /// Buy to open (starts a long position).
    #[serde(alias = "BTO")]
    OpenBuy,
    /// Sell to close (reduces a long position).
    #[serde(alias = "STC")]
    CloseSell,
    /// Buy to close (covers a short position).
    #[serde(alias = "BTC")]
    CloseBuy,
    /// Contract expired.
    #[serde(alias = "OEXP")]
    Expire,
    /// Contract assigned (or exercised).
    #[serde(alias = "OASGN")]
    Assign,
}

impl ActionCode {
    /// All action codes in declaration order.
    pub const ALL: [Self; 6] = [
        Self::OpenSell,
        Self::OpenBuy,
        Self::CloseSell,
        Self::CloseBuy,
        Self::Expire,
        Self::Assign,
    ];

    /// Check if this code opens a position.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        matches!(self, Self::OpenSell | Self::OpenBuy)
    }

    /// Check if this code resolves open quantity.
    #[must_use]
    pub const fn is_closing(&self) -> bool {
        !self.is_opening()
    }

    /// Check if this is an assignment.
    #[must_use]
    pub const fn is_assignment(&self) -> bool {
        matches!(self, Self::Assign)
    }

    /// Side of the position created by an opening code.
    #[must_use]
    pub const fn opened_side(&self) -> Option<PositionSide> {
        match self {
            Self::OpenSell => Some(PositionSide::Short),
            Self::OpenBuy => Some(PositionSide::Long),
            Self::CloseSell | Self::CloseBuy | Self::Expire | Self::Assign => None,
        }
    }

    /// Side of the position a closing trade must reduce.
    ///
    /// `None` for opening codes and for lifecycle events, which resolve
    /// whichever side is open.
    #[must_use]
    pub const fn closed_side(&self) -> Option<PositionSide> {
        match self {
            Self::CloseBuy => Some(PositionSide::Short),
            Self::CloseSell => Some(PositionSide::Long),
            Self::OpenSell | Self::OpenBuy | Self::Expire | Self::Assign => None,
        }
    }

    /// Broker trans code for this action.
    #[must_use]
    pub const fn broker_code(&self) -> &'static str {
        match self {
            Self::OpenSell => "STO",
            Self::OpenBuy => "BTO",
            Self::CloseSell => "STC",
            Self::CloseBuy => "BTC",
            Self::Expire => "OEXP",
            Self::Assign => "OASGN",
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenSell => "OPEN_SELL",
            Self::OpenBuy => "OPEN_BUY",
            Self::CloseSell => "CLOSE_SELL",
            Self::CloseBuy => "CLOSE_BUY",
            Self::Expire => "EXPIRE",
            Self::Assign => "ASSIGN",
        }
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionCode {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized || code.broker_code() == normalized)
            .ok_or_else(|| TransactionError::UnknownActionCode {
                code: s.to_string(),
            })
    }
}

//! Lot Resolution and Leg Status Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a matched lot's quantity left the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotResolution {
    /// Still open at the end of the stream.
    Open,
    /// Offset by a closing trade.
    ClosedByTrade,
    /// Expired worthless.
    Expired,
    /// Resolved by assignment or exercise.
    Assigned,
}

impl LotResolution {
    /// Check if the lot is resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl fmt::Display for LotResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::ClosedByTrade => write!(f, "CLOSED_BY_TRADE"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Assigned => write!(f, "ASSIGNED"),
        }
    }
}

/// Lifecycle state of a matched leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegStatus {
    /// At least one contract is still open.
    #[default]
    Open,
    /// Every contract has been resolved.
    Closed,
}

impl fmt::Display for LegStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

//! Leg Matching Value Objects

mod lot_resolution;
mod matched_lot;

pub use lot_resolution::{LegStatus, LotResolution};
pub use matched_lot::MatchedLegLot;

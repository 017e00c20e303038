//! Leg Matching Aggregates

mod matched_leg;

pub use matched_leg::MatchedLeg;

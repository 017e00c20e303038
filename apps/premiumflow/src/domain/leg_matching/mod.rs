//! Leg Matching Bounded Context
//!
//! Reconstructs positions ("legs") from raw fills under FIFO quantity
//! consumption.
//!
//! # Key Concepts
//!
//! - **Matched Leg Aggregate**: One position on one contract in one account,
//!   OPEN until its last contract is resolved, then CLOSED for good
//! - **Matched Lots**: Slices of opening fills paired with the event that
//!   resolved them, with premium and fees pro-rated to cents
//! - **Fail-fast**: Over-closes and direction conflicts abort the call

pub mod aggregate;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use aggregate::MatchedLeg;
pub use errors::MatchingError;
pub use services::{FifoMatcher, FillRemainder, match_legs};
pub use value_objects::{LegStatus, LotResolution, MatchedLegLot};

//! Leg Matching Domain Services

mod fifo_matcher;
mod fill_remainder;

pub use fifo_matcher::{FifoMatcher, match_legs};
pub use fill_remainder::FillRemainder;

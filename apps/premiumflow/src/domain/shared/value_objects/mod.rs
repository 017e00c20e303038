//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod money;
mod symbol;

pub use money::{CONTRACT_MULTIPLIER, Money};
pub use symbol::Symbol;

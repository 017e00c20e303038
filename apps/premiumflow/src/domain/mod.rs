//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless, pure business logic
//!
//! # Bounded Contexts
//!
//! - [`option_transaction`]: Normalized fills, contract identity, validation
//! - [`leg_matching`]: FIFO reconstruction of legs from fills
//! - [`cash_flow`]: Period-bucketed cash flow and realized P/L

pub mod cash_flow;
pub mod leg_matching;
pub mod option_transaction;
pub mod shared;

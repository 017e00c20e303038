//! Option Transaction Domain Services

mod ordering;
mod validation;

pub use ordering::chronological_order;
pub use validation::validate_transactions;

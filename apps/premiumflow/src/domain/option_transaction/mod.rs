//! Option Transaction Bounded Context
//!
//! The canonical record produced by the normalizer, plus the checks and
//! ordering rules every downstream consumer shares:
//! - Contract identity (`ContractKey`)
//! - Closed set of action codes with broker aliases
//! - Fail-fast validation and stable chronological ordering

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::TransactionError;
pub use services::{chronological_order, validate_transactions};
pub use value_objects::{
    ActionCode, ContractKey, NormalizedOptionTransaction, OptionType, PositionSide,
};

//! Option Transaction Value Objects

mod action_code;
mod contract_key;
mod option_type;
mod position_side;
mod transaction;

pub use action_code::ActionCode;
pub use contract_key::ContractKey;
pub use option_type::OptionType;
pub use position_side::PositionSide;
pub use transaction::NormalizedOptionTransaction;

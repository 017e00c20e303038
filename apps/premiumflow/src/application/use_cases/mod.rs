//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod cash_flow_report;
mod error;
mod match_legs;

pub use cash_flow_report::CashFlowReportUseCase;
pub use error::UseCaseError;
pub use match_legs::MatchLegsUseCase;

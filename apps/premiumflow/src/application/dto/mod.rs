//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for use case inputs and rendered outputs.

mod leg_dto;
mod report_dto;

pub use leg_dto::MatchedLegDto;
pub use report_dto::CashFlowReportRequestDto;

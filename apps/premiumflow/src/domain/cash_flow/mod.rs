//! Cash Flow Bounded Context
//!
//! Rolls realized cash into daily, weekly, monthly or total buckets.
//!
//! # Key Concepts
//!
//! - **Period Metrics**: Credits, debits, fees and net realized P/L per bucket
//! - **Lot P/L**: Matched lots add realized profits and losses by closing
//!   date, and open premium as unrealized exposure
//! - **Assignment Handling**: Assignment cash either counts toward the
//!   buckets or is reported only as `assignment_premium_after_fees`
//! - **Report Options**: Inclusive date window and ticker filter

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::ReportError;
pub use services::{
    generate_cash_flow_pnl_report, generate_cash_flow_pnl_report_with_legs,
    generate_cash_flow_pnl_report_with_options,
};
pub use value_objects::{
    AssignmentHandling, CashFlowPnlReport, PeriodKey, PeriodMetrics, PeriodType, ReportOptions,
};

//! Cash Flow Value Objects

mod period_key;
mod period_metrics;
mod period_type;
mod report;
mod report_options;

pub use period_key::PeriodKey;
pub use period_metrics::PeriodMetrics;
pub use period_type::{AssignmentHandling, PeriodType};
pub use report::CashFlowPnlReport;
pub use report_options::ReportOptions;

//! Cash Flow Report DTOs

use serde::{Deserialize, Serialize};

use crate::application::ports::TransactionQuery;
use crate::domain::cash_flow::{AssignmentHandling, PeriodType, ReportOptions};

/// Input for the cash-flow report use case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowReportRequestDto {
    /// Bucket granularity.
    #[serde(default)]
    pub period_type: PeriodType,
    /// Assignment treatment.
    #[serde(default)]
    pub assignment_handling: AssignmentHandling,
    /// Date window and ticker filter.
    #[serde(default)]
    pub options: ReportOptions,
    /// Account selection.
    #[serde(skip)]
    pub query: TransactionQuery,
}

//! Cash Flow Report Use Case

use std::sync::Arc;

use super::UseCaseError;
use crate::application::dto::CashFlowReportRequestDto;
use crate::application::ports::TransactionSourcePort;
use crate::domain::cash_flow::{CashFlowPnlReport, generate_cash_flow_pnl_report_with_legs};
use crate::domain::leg_matching::match_legs;

/// Use case for building a cash-flow P/L report from a transaction source.
pub struct CashFlowReportUseCase<S>
where
    S: TransactionSourcePort,
{
    source: Arc<S>,
}

impl<S> CashFlowReportUseCase<S>
where
    S: TransactionSourcePort,
{
    /// Create a new `CashFlowReportUseCase`.
    pub const fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch the queried transactions, match them into legs and aggregate
    /// both the cash flow and the lot-level realized P/L.
    ///
    /// # Errors
    ///
    /// Returns [`UseCaseError`] if loading, matching or aggregation fails.
    pub async fn execute(
        &self,
        request: &CashFlowReportRequestDto,
    ) -> Result<CashFlowPnlReport, UseCaseError> {
        let transactions = self.source.fetch_transactions(&request.query).await?;
        let legs = match_legs(&transactions)
            .inspect_err(|e| tracing::warn!(error = %e, "Leg matching failed"))?;

        let report = generate_cash_flow_pnl_report_with_legs(
            &transactions,
            &legs,
            request.period_type,
            request.assignment_handling,
            &request.options,
        )
        .inspect_err(|e| tracing::warn!(error = %e, "Cash flow report failed"))?;

        tracing::info!(
            period_type = %report.period_type(),
            periods = report.periods().len(),
            net_realized_pnl = %report.totals().net_realized_pnl(),
            realized_pnl_net = %report.totals().realized_pnl_net(),
            "Cash flow report generated"
        );
        Ok(report)
    }
}

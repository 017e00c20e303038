//! Match Legs Use Case

use std::sync::Arc;

use super::UseCaseError;
use crate::application::ports::{TransactionQuery, TransactionSourcePort};
use crate::domain::leg_matching::{MatchedLeg, match_legs};

/// Use case for reconstructing legs from a transaction source.
pub struct MatchLegsUseCase<S>
where
    S: TransactionSourcePort,
{
    source: Arc<S>,
}

impl<S> MatchLegsUseCase<S>
where
    S: TransactionSourcePort,
{
    /// Create a new `MatchLegsUseCase`.
    pub const fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch the queried transactions and match them.
    ///
    /// # Errors
    ///
    /// Returns [`UseCaseError`] if loading or matching fails.
    pub async fn execute(&self, query: &TransactionQuery) -> Result<Vec<MatchedLeg>, UseCaseError> {
        let transactions = self.source.fetch_transactions(query).await?;

        let legs = match_legs(&transactions).inspect_err(|e| {
            tracing::warn!(error = %e, leg_id = ?e.leg_id(), "Leg matching failed");
        })?;

        tracing::info!(
            transactions = transactions.len(),
            legs = legs.len(),
            open_legs = legs.iter().filter(|leg| leg.is_open()).count(),
            "Legs matched"
        );
        Ok(legs)
    }
}

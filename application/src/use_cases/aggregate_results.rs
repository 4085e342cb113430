//! Aggregate Results use case
//!
//! Snapshots the vote store and runs the aggregation engine over it.
//! Nothing is cached: every execution recomputes from the current store
//! contents, so results can never go stale.

use crate::ports::vote_store::VoteStorePort;
use clarity_domain::aggregation::{AggregatedResult, ScoringWeights, aggregate_with_weights};
use clarity_domain::session::Initiative;
use std::sync::Arc;
use tracing::debug;

/// Use case for computing the ranked initiative summary
pub struct AggregateResultsUseCase<S: VoteStorePort> {
    store: Arc<S>,
    weights: ScoringWeights,
}

impl<S: VoteStorePort> AggregateResultsUseCase<S> {
    /// Aggregate with the standard weights
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            weights: ScoringWeights::default(),
        }
    }

    /// Override the dimension weights (validated at construction by the
    /// configuration loader)
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Rank the given initiatives against the current vote snapshot
    pub async fn execute(&self, initiatives: &[Initiative]) -> Vec<AggregatedResult> {
        let votes = self.store.list_votes(None).await;
        debug!(
            initiatives = initiatives.len(),
            votes = votes.len(),
            "aggregating vote snapshot"
        );
        aggregate_with_weights(initiatives, &votes, &self.weights)
    }
}

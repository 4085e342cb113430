//! In-memory vote store
//!
//! The reference adapter for [`VoteStorePort`]: a map keyed by the natural
//! `(initiative_id, member_id)` vote key behind an async RwLock. The write
//! lock makes every delete-then-insert atomic, so concurrent readers never
//! observe the transient gap between removal and re-insertion.

use async_trait::async_trait;
use clarity_application::ports::vote_store::VoteStorePort;
use clarity_domain::vote::{Score, Vote};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::trace;

/// In-memory [`VoteStorePort`] adapter
///
/// A BTreeMap keeps `list_votes` output in a stable (initiative, member)
/// order regardless of insertion history.
#[derive(Default)]
pub struct InMemoryVoteStore {
    votes: RwLock<BTreeMap<(String, String), Vote>>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live votes
    pub async fn len(&self) -> usize {
        self.votes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.votes.read().await.is_empty()
    }
}

#[async_trait]
impl VoteStorePort for InMemoryVoteStore {
    async fn record_vote(
        &self,
        initiative_id: &str,
        member_id: &str,
        scores: Option<Score>,
        is_abstain: bool,
    ) {
        let key = (initiative_id.to_string(), member_id.to_string());
        let mut votes = self.votes.write().await;

        votes.remove(&key);
        if !is_abstain {
            if let Some(scores) = scores {
                trace!(initiative = initiative_id, member = member_id, "vote recorded");
                votes.insert(key, Vote::new(initiative_id, member_id, scores));
                return;
            }
        }
        trace!(initiative = initiative_id, member = member_id, "vote cleared");
    }

    async fn list_votes(&self, initiative_id: Option<&str>) -> Vec<Vote> {
        let votes = self.votes.read().await;
        votes
            .values()
            .filter(|v| initiative_id.is_none_or(|id| v.initiative_id == id))
            .cloned()
            .collect()
    }
}

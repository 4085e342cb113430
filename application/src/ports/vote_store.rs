//! Vote store port
//!
//! The vote store holds the authoritative set of current votes - one slot
//! per `(initiative, member)` pair - and is the only shared mutable state
//! between participants. Implementations live in the infrastructure layer
//! (in-memory today; a synced remote store satisfies the same contract as
//! long as it eventually delivers the latest committed snapshot).

use async_trait::async_trait;
use clarity_domain::vote::{Score, Vote};

/// Authoritative store of current votes
///
/// Both operations are infallible by contract: the store trusts its caller
/// to have validated scores and gated roles, accepts dangling ids (orphans
/// are the aggregation engine's problem), and treats persistence hiccups
/// as an adapter-internal concern - writes are fire-and-forget from the
/// core's perspective.
#[async_trait]
pub trait VoteStorePort: Send + Sync {
    /// Replace the vote for `(initiative_id, member_id)`
    ///
    /// Any existing vote for the pair is removed first. A new vote is
    /// inserted only when `is_abstain` is false and scores are present, so
    /// an abstention clears the pair. The delete-then-insert must be
    /// atomic: concurrent readers never observe the transient gap.
    /// Last write wins across participants.
    async fn record_vote(
        &self,
        initiative_id: &str,
        member_id: &str,
        scores: Option<Score>,
        is_abstain: bool,
    );

    /// Snapshot the current votes, optionally filtered to one initiative
    async fn list_votes(&self, initiative_id: Option<&str>) -> Vec<Vote>;
}

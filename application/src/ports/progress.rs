//! Ballot progress notifications
//!
//! Lets a front end observe a walkthrough without the use case knowing
//! anything about rendering.

use clarity_domain::session::Initiative;

/// Callbacks fired as a ballot walkthrough progresses
pub trait BallotProgress: Send + Sync {
    /// A new initiative is in front of the participant
    fn on_initiative_presented(&self, index: usize, total: usize, initiative: &Initiative);

    /// A confirmed decision reached the vote store
    fn on_vote_recorded(&self, initiative_id: &str, abstained: bool);

    /// The walkthrough reached its terminal state
    fn on_ballot_finished(&self, member_id: &str);
}

/// No-op progress for headless callers
pub struct NoProgress;

impl BallotProgress for NoProgress {
    fn on_initiative_presented(&self, _index: usize, _total: usize, _initiative: &Initiative) {}
    fn on_vote_recorded(&self, _initiative_id: &str, _abstained: bool) {}
    fn on_ballot_finished(&self, _member_id: &str) {}
}

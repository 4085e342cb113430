//! Run Ballot use case
//!
//! Drives one participant's ballot walkthrough against the shared vote
//! store. The domain [`Ballot`] decides every transition; this use case is
//! the only component that turns a confirmed decision into a store write,
//! and it performs exactly one write per confirmation.

use crate::ports::progress::{BallotProgress, NoProgress};
use crate::ports::vote_store::VoteStorePort;
use clarity_domain::DomainError;
use clarity_domain::ballot::{Ballot, TransitionResult};
use clarity_domain::session::Initiative;
use clarity_domain::vote::Score;
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for walking a participant through the initiative list
pub struct RunBallotUseCase<S: VoteStorePort> {
    store: Arc<S>,
    progress: Arc<dyn BallotProgress>,
}

impl<S: VoteStorePort> RunBallotUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            progress: Arc::new(NoProgress),
        }
    }

    /// Attach a progress observer (front ends)
    pub fn with_progress(mut self, progress: Arc<dyn BallotProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Open a ballot for `member_id`, pre-loading prior votes from the
    /// current store snapshot
    ///
    /// `can_vote` is the caller-evaluated gating verdict (role allows
    /// voting AND the session is not locked). The core never derives it.
    pub async fn start(
        &self,
        initiatives: Vec<Initiative>,
        member_id: impl Into<String>,
        can_vote: bool,
    ) -> Ballot {
        let member_id = member_id.into();
        let prior = self.store.list_votes(None).await;

        info!(
            member = %member_id,
            initiatives = initiatives.len(),
            can_vote,
            "starting ballot walkthrough"
        );

        let ballot = Ballot::start(initiatives, member_id, &prior, can_vote);
        match ballot.current_initiative() {
            Some(initiative) => {
                let (index, total) = ballot.progress();
                self.progress.on_initiative_presented(index, total, initiative);
            }
            None => self.progress.on_ballot_finished(ballot.member_id()),
        }
        ballot
    }

    /// Buffer in-progress scores without committing
    pub fn submit_scores(&self, ballot: &mut Ballot, scores: Score) -> Result<(), DomainError> {
        ballot.submit_scores(scores)
    }

    /// Ask to commit the buffered scores (enters confirmation for voters,
    /// advances immediately for non-voters)
    pub fn request_commit(&self, ballot: &mut Ballot) -> Result<TransitionResult, DomainError> {
        let transition = ballot.request_commit()?;
        self.notify_navigation(ballot, transition);
        Ok(transition)
    }

    /// Ask to abstain on the current initiative
    pub fn request_abstain(&self, ballot: &mut Ballot) -> Result<TransitionResult, DomainError> {
        let transition = ballot.request_abstain()?;
        self.notify_navigation(ballot, transition);
        Ok(transition)
    }

    /// Abort the pending confirmation; the in-progress buffer survives
    pub fn cancel_confirm(&self, ballot: &mut Ballot) -> Result<(), DomainError> {
        ballot.cancel_confirm()
    }

    /// Resolve the pending confirmation: one store write, then advance
    pub async fn confirm(&self, ballot: &mut Ballot) -> Result<TransitionResult, DomainError> {
        let (commit, transition) = ballot.confirm()?;

        debug!(
            initiative = %commit.initiative_id,
            member = %commit.member_id,
            abstain = commit.is_abstain,
            "committing vote"
        );
        self.store
            .record_vote(
                &commit.initiative_id,
                &commit.member_id,
                commit.scores,
                commit.is_abstain,
            )
            .await;
        self.progress
            .on_vote_recorded(&commit.initiative_id, commit.is_abstain);

        self.notify_navigation(ballot, transition);
        Ok(transition)
    }

    /// Step back to the previous initiative
    pub fn back(&self, ballot: &mut Ballot) -> Result<(), DomainError> {
        ballot.back()?;
        if let Some(initiative) = ballot.current_initiative() {
            let (index, total) = ballot.progress();
            self.progress.on_initiative_presented(index, total, initiative);
        }
        Ok(())
    }

    fn notify_navigation(&self, ballot: &Ballot, transition: TransitionResult) {
        match transition {
            TransitionResult::Advanced { index } => {
                if let Some(initiative) = ballot.current_initiative() {
                    let (_, total) = ballot.progress();
                    self.progress.on_initiative_presented(index, total, initiative);
                }
            }
            TransitionResult::Finished => {
                info!(member = %ballot.member_id(), "ballot walkthrough finished");
                self.progress.on_ballot_finished(ballot.member_id());
            }
            TransitionResult::AwaitingConfirmation { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clarity_domain::vote::Vote;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store double that records every write it receives
    #[derive(Default)]
    struct RecordingStore {
        votes: Mutex<Vec<Vote>>,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl VoteStorePort for RecordingStore {
        async fn record_vote(
            &self,
            initiative_id: &str,
            member_id: &str,
            scores: Option<Score>,
            is_abstain: bool,
        ) {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut votes = self.votes.lock().unwrap();
            votes.retain(|v| !v.matches(initiative_id, member_id));
            if !is_abstain {
                if let Some(scores) = scores {
                    votes.push(Vote::new(initiative_id, member_id, scores));
                }
            }
        }

        async fn list_votes(&self, initiative_id: Option<&str>) -> Vec<Vote> {
            self.votes
                .lock()
                .unwrap()
                .iter()
                .filter(|v| initiative_id.is_none_or(|id| v.initiative_id == id))
                .cloned()
                .collect()
        }
    }

    #[derive(Default)]
    struct CountingProgress {
        presented: AtomicUsize,
        recorded: AtomicUsize,
        finished: AtomicUsize,
    }

    impl BallotProgress for CountingProgress {
        fn on_initiative_presented(&self, _index: usize, _total: usize, _initiative: &Initiative) {
            self.presented.fetch_add(1, Ordering::SeqCst);
        }
        fn on_vote_recorded(&self, _initiative_id: &str, _abstained: bool) {
            self.recorded.fetch_add(1, Ordering::SeqCst);
        }
        fn on_ballot_finished(&self, _member_id: &str) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn initiatives(n: usize) -> Vec<Initiative> {
        (1..=n)
            .map(|i| Initiative::new(format!("x{i}"), format!("Initiative {i}")))
            .collect()
    }

    fn score(value: u8) -> Score {
        Score::new(value, value, value, value).unwrap()
    }

    #[tokio::test]
    async fn test_confirm_writes_exactly_once() {
        let store = Arc::new(RecordingStore::default());
        let use_case = RunBallotUseCase::new(Arc::clone(&store));

        let mut ballot = use_case.start(initiatives(1), "m1", true).await;
        use_case.submit_scores(&mut ballot, score(4)).unwrap();
        use_case.request_commit(&mut ballot).unwrap();

        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        use_case.confirm(&mut ballot).await.unwrap();
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);

        let votes = store.list_votes(Some("x1")).await;
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].scores, Some(score(4)));
    }

    #[tokio::test]
    async fn test_cancel_writes_nothing() {
        let store = Arc::new(RecordingStore::default());
        let use_case = RunBallotUseCase::new(Arc::clone(&store));

        let mut ballot = use_case.start(initiatives(1), "m1", true).await;
        use_case.request_commit(&mut ballot).unwrap();
        use_case.cancel_confirm(&mut ballot).unwrap();

        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_observer_walkthrough_never_touches_the_store() {
        let store = Arc::new(RecordingStore::default());
        let use_case = RunBallotUseCase::new(Arc::clone(&store));

        let mut ballot = use_case.start(initiatives(3), "m1", false).await;
        use_case.request_commit(&mut ballot).unwrap();
        use_case.request_abstain(&mut ballot).unwrap();
        let transition = use_case.request_commit(&mut ballot).unwrap();

        assert_eq!(transition, TransitionResult::Finished);
        assert!(ballot.is_finished());
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_start_preloads_prior_votes_from_store() {
        let store = Arc::new(RecordingStore::default());
        store.record_vote("x1", "m1", Some(score(2)), false).await;

        let use_case = RunBallotUseCase::new(Arc::clone(&store));
        let ballot = use_case.start(initiatives(1), "m1", true).await;
        assert_eq!(ballot.buffered_scores(), score(2));
    }

    #[tokio::test]
    async fn test_abstain_clears_prior_vote() {
        let store = Arc::new(RecordingStore::default());
        store.record_vote("x1", "m1", Some(score(3)), false).await;

        let use_case = RunBallotUseCase::new(Arc::clone(&store));
        let mut ballot = use_case.start(initiatives(1), "m1", true).await;
        use_case.request_abstain(&mut ballot).unwrap();
        use_case.confirm(&mut ballot).await.unwrap();

        assert!(store.list_votes(Some("x1")).await.is_empty());
    }

    #[tokio::test]
    async fn test_progress_notifications() {
        let store = Arc::new(RecordingStore::default());
        let progress = Arc::new(CountingProgress::default());
        let use_case =
            RunBallotUseCase::new(Arc::clone(&store)).with_progress(Arc::clone(&progress) as Arc<dyn BallotProgress>);

        let mut ballot = use_case.start(initiatives(2), "m1", true).await;
        use_case.request_commit(&mut ballot).unwrap();
        use_case.confirm(&mut ballot).await.unwrap();
        use_case.request_abstain(&mut ballot).unwrap();
        use_case.confirm(&mut ballot).await.unwrap();

        // Presented at start and once after the first confirm
        assert_eq!(progress.presented.load(Ordering::SeqCst), 2);
        assert_eq!(progress.recorded.load(Ordering::SeqCst), 2);
        assert_eq!(progress.finished.load(Ordering::SeqCst), 1);
    }
}

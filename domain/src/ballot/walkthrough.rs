//! Ballot walkthrough state machine (Entity)
//!
//! One ballot per participant. The ballot owns only its own in-progress
//! buffer; the shared vote store is written by the caller, which receives
//! a [`CommitRequest`] from [`Ballot::confirm`] and must issue exactly one
//! store write per confirmation. No other component writes on the
//! participant's behalf.

use crate::core::error::DomainError;
use crate::session::entities::Initiative;
use crate::vote::entities::{Score, Vote};
use std::collections::HashMap;

/// Where a ballot currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotState {
    /// Scoring the initiative at the current index
    Voting,
    /// Awaiting explicit confirmation before committing
    Confirming { pending_abstain: bool },
    /// All initiatives handled (terminal)
    Finished,
}

/// Outcome of a ballot transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionResult {
    /// A confirmation step is now pending
    AwaitingConfirmation { pending_abstain: bool },
    /// Moved on to the initiative at `index`
    Advanced { index: usize },
    /// The walkthrough is complete
    Finished,
}

/// The single store write a confirmed transition must perform
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    pub initiative_id: String,
    pub member_id: String,
    pub scores: Option<Score>,
    pub is_abstain: bool,
}

/// Per-participant walkthrough over the initiative list
///
/// # Example
///
/// ```
/// use clarity_domain::ballot::{Ballot, TransitionResult};
/// use clarity_domain::session::Initiative;
/// use clarity_domain::vote::Score;
///
/// let initiatives = vec![Initiative::new("x1", "Alpha")];
/// let mut ballot = Ballot::start(initiatives, "m1", &[], true);
///
/// ballot.submit_scores(Score::new(5, 4, 3, 5).unwrap()).unwrap();
/// ballot.request_commit().unwrap();
/// let (commit, transition) = ballot.confirm().unwrap();
///
/// assert_eq!(commit.initiative_id, "x1");
/// assert_eq!(transition, TransitionResult::Finished);
/// ```
#[derive(Debug, Clone)]
pub struct Ballot {
    member_id: String,
    initiatives: Vec<Initiative>,
    can_vote: bool,
    index: usize,
    state: BallotState,
    buffer: Score,
    /// Latest committed score per initiative id, seeded from prior votes
    /// and updated on every confirm
    recorded: HashMap<String, Score>,
}

impl Ballot {
    /// Start a walkthrough at the first initiative
    ///
    /// `prior_votes` seeds the committed-score map so earlier submissions
    /// pre-load into the buffer for re-editing. `can_vote` is the
    /// caller-evaluated gating verdict (role plus session lock); when
    /// false, every commit step is skipped while navigation still works.
    /// An empty initiative list finishes immediately.
    pub fn start(
        initiatives: Vec<Initiative>,
        member_id: impl Into<String>,
        prior_votes: &[Vote],
        can_vote: bool,
    ) -> Self {
        let member_id = member_id.into();
        let recorded: HashMap<String, Score> = prior_votes
            .iter()
            .filter(|v| v.member_id == member_id && v.is_scored())
            .filter_map(|v| v.scores.map(|s| (v.initiative_id.clone(), s)))
            .collect();

        let state = if initiatives.is_empty() {
            BallotState::Finished
        } else {
            BallotState::Voting
        };

        let mut ballot = Self {
            member_id,
            initiatives,
            can_vote,
            index: 0,
            state,
            buffer: Score::default(),
            recorded,
        };
        ballot.reload_buffer();
        ballot
    }

    pub fn state(&self) -> BallotState {
        self.state
    }

    /// The initiative currently being scored (None once finished)
    pub fn current_initiative(&self) -> Option<&Initiative> {
        match self.state {
            BallotState::Finished => None,
            _ => self.initiatives.get(self.index),
        }
    }

    /// The uncommitted in-progress scores
    pub fn buffered_scores(&self) -> Score {
        self.buffer
    }

    /// Walkthrough position as (current index, total)
    pub fn progress(&self) -> (usize, usize) {
        (self.index, self.initiatives.len())
    }

    pub fn is_finished(&self) -> bool {
        self.state == BallotState::Finished
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Buffer new in-progress scores without committing anything
    pub fn submit_scores(&mut self, scores: Score) -> Result<(), DomainError> {
        match self.state {
            BallotState::Voting => {
                self.buffer = scores;
                Ok(())
            }
            BallotState::Confirming { .. } => Err(DomainError::InvalidTransition(
                "cannot edit scores while a confirmation is pending".into(),
            )),
            BallotState::Finished => Err(DomainError::InvalidTransition(
                "ballot is already finished".into(),
            )),
        }
    }

    /// Ask to commit the buffered scores for the current initiative
    ///
    /// Voting participants move into the confirmation sub-state. Non-voting
    /// participants (observer role, locked session) bypass confirmation AND
    /// the commit entirely - the walkthrough simply advances.
    pub fn request_commit(&mut self) -> Result<TransitionResult, DomainError> {
        self.enter_confirmation(false)
    }

    /// Ask to abstain on the current initiative
    ///
    /// Confirmed abstention clears any previously committed vote for the
    /// pair rather than recording a distinct abstained state.
    pub fn request_abstain(&mut self) -> Result<TransitionResult, DomainError> {
        self.enter_confirmation(true)
    }

    fn enter_confirmation(&mut self, pending_abstain: bool) -> Result<TransitionResult, DomainError> {
        match self.state {
            BallotState::Voting => {
                if !self.can_vote {
                    // Navigation-only mode: no confirmation, no store write
                    return Ok(self.advance());
                }
                self.state = BallotState::Confirming { pending_abstain };
                Ok(TransitionResult::AwaitingConfirmation { pending_abstain })
            }
            BallotState::Confirming { .. } => Err(DomainError::InvalidTransition(
                "a confirmation is already pending".into(),
            )),
            BallotState::Finished => Err(DomainError::InvalidTransition(
                "ballot is already finished".into(),
            )),
        }
    }

    /// Abort the pending confirmation, keeping the buffer untouched
    pub fn cancel_confirm(&mut self) -> Result<(), DomainError> {
        match self.state {
            BallotState::Confirming { .. } => {
                self.state = BallotState::Voting;
                Ok(())
            }
            _ => Err(DomainError::InvalidTransition(
                "no confirmation is pending".into(),
            )),
        }
    }

    /// Resolve the pending confirmation
    ///
    /// Returns the exact store write the caller must perform, plus the
    /// resulting transition. The committed value also updates the local
    /// record so back navigation re-displays it.
    pub fn confirm(&mut self) -> Result<(CommitRequest, TransitionResult), DomainError> {
        let pending_abstain = match self.state {
            BallotState::Confirming { pending_abstain } => pending_abstain,
            _ => {
                return Err(DomainError::InvalidTransition(
                    "no confirmation is pending".into(),
                ));
            }
        };

        // current_initiative is always present while confirming
        let initiative_id = match self.initiatives.get(self.index) {
            Some(initiative) => initiative.id.clone(),
            None => {
                return Err(DomainError::InvalidTransition(
                    "no initiative at the current position".into(),
                ));
            }
        };

        let commit = if pending_abstain {
            self.recorded.remove(&initiative_id);
            CommitRequest {
                initiative_id,
                member_id: self.member_id.clone(),
                scores: None,
                is_abstain: true,
            }
        } else {
            self.recorded.insert(initiative_id.clone(), self.buffer);
            CommitRequest {
                initiative_id,
                member_id: self.member_id.clone(),
                scores: Some(self.buffer),
                is_abstain: false,
            }
        };

        let transition = self.advance();
        Ok((commit, transition))
    }

    /// Step back to the previous initiative for re-editing
    ///
    /// Reloads the previously committed vote (or the mid-range default)
    /// into the buffer. Going back never rolls back a commit.
    pub fn back(&mut self) -> Result<(), DomainError> {
        match self.state {
            BallotState::Voting if self.index > 0 => {
                self.index -= 1;
                self.reload_buffer();
                Ok(())
            }
            BallotState::Voting => Err(DomainError::InvalidTransition(
                "already at the first initiative".into(),
            )),
            BallotState::Confirming { .. } => Err(DomainError::InvalidTransition(
                "resolve the pending confirmation first".into(),
            )),
            BallotState::Finished => Err(DomainError::InvalidTransition(
                "ballot is already finished".into(),
            )),
        }
    }

    fn advance(&mut self) -> TransitionResult {
        if self.index + 1 < self.initiatives.len() {
            self.index += 1;
            self.state = BallotState::Voting;
            self.reload_buffer();
            TransitionResult::Advanced { index: self.index }
        } else {
            self.state = BallotState::Finished;
            TransitionResult::Finished
        }
    }

    fn reload_buffer(&mut self) {
        self.buffer = self
            .current_initiative()
            .and_then(|initiative| self.recorded.get(&initiative.id).copied())
            .unwrap_or_default();
    }
}

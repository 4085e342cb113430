//! Ballot domain
//!
//! The walkthrough state machine that drives one participant through the
//! initiative list, one initiative at a time, with explicit confirmation
//! before every commit and back navigation for re-editing.

pub mod walkthrough;

pub use walkthrough::{Ballot, BallotState, CommitRequest, TransitionResult};

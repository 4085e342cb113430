//! Domain layer for vector-clarity
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Vector Score
//!
//! Participants rate each initiative across four weighted dimensions
//! (importance, feasibility, urgency, alignment). The aggregation engine
//! collapses the per-member scores into a single 0-100 vector score per
//! initiative and returns a ranked list.
//!
//! ## Ballot
//!
//! A ballot walks one participant through all initiatives in sequence,
//! buffering an in-progress score and requiring explicit confirmation
//! before anything is committed to the vote store.

pub mod aggregation;
pub mod ballot;
pub mod core;
pub mod session;
pub mod vote;

// Re-export commonly used types
pub use aggregation::{
    engine::{AggregatedResult, aggregate, aggregate_with_weights},
    weights::ScoringWeights,
};
pub use ballot::walkthrough::{Ballot, BallotState, CommitRequest, TransitionResult};
pub use core::error::DomainError;
pub use session::entities::{Initiative, Member, Session, SystemRole, can_vote};
pub use vote::entities::{Score, Vote};

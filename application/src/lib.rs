//! Application layer for vector-clarity
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for the ports live in the infrastructure
//! layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    progress::{BallotProgress, NoProgress},
    vote_store::VoteStorePort,
};
pub use use_cases::aggregate_results::AggregateResultsUseCase;
pub use use_cases::run_ballot::RunBallotUseCase;

//! Aggregation domain
//!
//! Deterministically converts the initiative list plus the current vote
//! set into a ranked, weighted 0-100 vector score per initiative. The
//! engine is a pure function: it never mutates its inputs, never caches,
//! and identical snapshots always produce identical output.

pub mod engine;
pub mod weights;

pub use engine::{AggregatedResult, aggregate, aggregate_with_weights};
pub use weights::ScoringWeights;

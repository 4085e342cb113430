//! Vote domain
//!
//! One member's four-dimension score (or abstention) for one initiative.
//! The natural key of a vote is `(initiative_id, member_id)`: at most one
//! live vote exists per pair, and a replace is always a full
//! delete-then-insert, never a partial merge.

pub mod entities;

pub use entities::{Score, Vote};

//! Infrastructure layer for vector-clarity
//!
//! Adapters for the application-layer ports: the in-memory vote store,
//! the TOML configuration loader, and the session snapshot loader.

pub mod config;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileScoringConfig};
pub use snapshot::{SnapshotError, load_session, seed_votes};
pub use store::InMemoryVoteStore;

//! Session snapshot transport

pub mod loader;

pub use loader::{SnapshotError, load_session, seed_votes};

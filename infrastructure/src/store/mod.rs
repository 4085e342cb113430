//! Vote store adapters

pub mod memory;

pub use memory::InMemoryVoteStore;

//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The scoring core is a pure computation layer: valid, well-typed input
/// never fails at runtime. These variants cover boundary validation
/// (malformed scores, misconfigured weights) and driver bugs (illegal
/// ballot transitions), not user-facing conditions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("{dimension} score must be between 1 and 5, got {value}")]
    ScoreOutOfRange { dimension: &'static str, value: u8 },

    #[error("scoring weights must sum to 100, got {total}")]
    InvalidWeights { total: u16 },

    #[error("a session must keep at least one member")]
    LastMember,

    #[error("invalid ballot transition: {0}")]
    InvalidTransition(String),
}

impl DomainError {
    /// Check if this error was raised by score validation
    pub fn is_score_error(&self) -> bool {
        matches!(self, DomainError::ScoreOutOfRange { .. })
    }
}

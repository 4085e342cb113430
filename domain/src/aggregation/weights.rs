//! Dimension weights for the vector score

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Per-dimension weights, expressed as integer percentages
///
/// The four weights must sum to exactly 100. Integer percentages keep the
/// sum invariant exact - the equivalent f64 fractions (0.35 + 0.30 + 0.20
/// + 0.15) cannot be compared to 1.0 bit-exactly.
///
/// This is a configuration-time invariant, not runtime data: construction
/// fails fast, and a validated value never becomes invalid.
///
/// # Example
///
/// ```
/// use clarity_domain::aggregation::ScoringWeights;
///
/// let weights = ScoringWeights::default();
/// assert_eq!(weights.total(), 100);
///
/// assert!(ScoringWeights::new(40, 20, 15, 30).is_err()); // 105
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub importance: u8,
    pub feasibility: u8,
    pub urgency: u8,
    pub alignment: u8,
}

impl ScoringWeights {
    /// Create validated weights; the four percentages must sum to 100
    pub fn new(
        importance: u8,
        feasibility: u8,
        urgency: u8,
        alignment: u8,
    ) -> Result<Self, DomainError> {
        let weights = Self {
            importance,
            feasibility,
            urgency,
            alignment,
        };
        match weights.total() {
            100 => Ok(weights),
            total => Err(DomainError::InvalidWeights { total }),
        }
    }

    /// Sum of the four percentages
    pub fn total(&self) -> u16 {
        self.importance as u16
            + self.feasibility as u16
            + self.urgency as u16
            + self.alignment as u16
    }

    /// Percent-weighted sum of four per-dimension averages
    ///
    /// With averages in [1, 5] the result lands in [100, 500].
    pub fn weighted_sum(&self, importance: f64, feasibility: f64, urgency: f64, alignment: f64) -> f64 {
        importance * self.importance as f64
            + feasibility * self.feasibility as f64
            + urgency * self.urgency as f64
            + alignment * self.alignment as f64
    }
}

impl Default for ScoringWeights {
    /// Importance 35%, alignment 30%, feasibility 20%, urgency 15%
    fn default() -> Self {
        Self {
            importance: 35,
            feasibility: 20,
            urgency: 15,
            alignment: 30,
        }
    }
}

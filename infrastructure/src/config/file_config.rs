//! Configuration file schema (`clarity.toml`)
//!
//! Example configuration:
//!
//! ```toml
//! [scoring]
//! importance = 35
//! feasibility = 20
//! urgency = 15
//! alignment = 30
//! ```

use clarity_domain::DomainError;
use clarity_domain::aggregation::ScoringWeights;
use serde::{Deserialize, Serialize};

/// Root configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Dimension weights for the vector score (`[scoring]` section)
    pub scoring: FileScoringConfig,
}

/// Dimension weight percentages from TOML (`[scoring]` section)
///
/// The four percentages must sum to exactly 100; [`Self::to_weights`]
/// fails fast at startup rather than letting a misconfigured weight set
/// skew every score silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    pub importance: u8,
    pub feasibility: u8,
    pub urgency: u8,
    pub alignment: u8,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        let weights = ScoringWeights::default();
        Self {
            importance: weights.importance,
            feasibility: weights.feasibility,
            urgency: weights.urgency,
            alignment: weights.alignment,
        }
    }
}

impl FileScoringConfig {
    /// Validate into domain weights
    pub fn to_weights(&self) -> Result<ScoringWeights, DomainError> {
        ScoringWeights::new(
            self.importance,
            self.feasibility,
            self.urgency,
            self.alignment,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_domain_weights() {
        let config = FileConfig::default();
        assert_eq!(config.scoring.to_weights().unwrap(), ScoringWeights::default());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_misconfigured_weights_fail_fast() {
        let config: FileConfig = toml::from_str(
            r#"
            [scoring]
            importance = 50
            feasibility = 20
            urgency = 15
            alignment = 30
            "#,
        )
        .unwrap();

        let err = config.scoring.to_weights().unwrap_err();
        assert_eq!(err, DomainError::InvalidWeights { total: 115 });
    }

    #[test]
    fn test_custom_weights_parse() {
        let config: FileConfig = toml::from_str(
            r#"
            [scoring]
            importance = 25
            feasibility = 25
            urgency = 25
            alignment = 25
            "#,
        )
        .unwrap();

        let weights = config.scoring.to_weights().unwrap();
        assert_eq!(weights.total(), 100);
        assert_eq!(weights.importance, 25);
    }
}

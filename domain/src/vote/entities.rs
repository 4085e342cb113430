//! Vote entities and value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lower bound of every score dimension
pub const MIN_SCORE: u8 = 1;
/// Upper bound of every score dimension
pub const MAX_SCORE: u8 = 5;
/// Neutral mid-range value used as the starting buffer for a ballot
pub const DEFAULT_SCORE: u8 = 3;

/// A complete four-dimension score (value object)
///
/// Each dimension is an integer in the closed range [1, 5]. There are no
/// partial scores: a vote either carries all four dimensions or is an
/// abstention.
///
/// # Example
///
/// ```
/// use clarity_domain::vote::Score;
///
/// let score = Score::new(5, 4, 3, 5).unwrap();
/// assert_eq!(score.importance, 5);
///
/// assert!(Score::new(0, 3, 3, 3).is_err());
/// assert!(Score::new(3, 3, 3, 6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScore")]
pub struct Score {
    pub importance: u8,
    pub feasibility: u8,
    pub urgency: u8,
    pub alignment: u8,
}

impl Score {
    /// Create a validated score
    ///
    /// Rejects any dimension outside [1, 5]. This is the validation
    /// boundary: downstream consumers (the vote store, the aggregation
    /// engine) assume pre-validated input.
    pub fn new(
        importance: u8,
        feasibility: u8,
        urgency: u8,
        alignment: u8,
    ) -> Result<Self, DomainError> {
        check_dimension("importance", importance)?;
        check_dimension("feasibility", feasibility)?;
        check_dimension("urgency", urgency)?;
        check_dimension("alignment", alignment)?;

        Ok(Self {
            importance,
            feasibility,
            urgency,
            alignment,
        })
    }
}

impl Default for Score {
    /// Mid-range `{3,3,3,3}` - the initial in-progress buffer of a ballot
    fn default() -> Self {
        Self {
            importance: DEFAULT_SCORE,
            feasibility: DEFAULT_SCORE,
            urgency: DEFAULT_SCORE,
            alignment: DEFAULT_SCORE,
        }
    }
}

fn check_dimension(dimension: &'static str, value: u8) -> Result<(), DomainError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::ScoreOutOfRange { dimension, value })
    }
}

/// Unvalidated wire shape, only used to funnel deserialization through
/// [`Score::new`]
#[derive(Deserialize)]
struct RawScore {
    importance: u8,
    feasibility: u8,
    urgency: u8,
    alignment: u8,
}

impl TryFrom<RawScore> for Score {
    type Error = DomainError;

    fn try_from(raw: RawScore) -> Result<Self, Self::Error> {
        Score::new(raw.importance, raw.feasibility, raw.urgency, raw.alignment)
    }
}

/// A single member's vote on a single initiative
///
/// `(initiative_id, member_id)` is the natural key. An abstain marker
/// carries no scores; in the vote store an abstention clears the pair
/// instead of being persisted, so stored votes always have scores. The
/// marker form still exists on the wire (session snapshots, commit
/// requests) and the aggregation engine excludes it either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub initiative_id: String,
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Score>,
    #[serde(default)]
    pub is_abstain: bool,
}

impl Vote {
    /// Create a scored vote
    pub fn new(
        initiative_id: impl Into<String>,
        member_id: impl Into<String>,
        scores: Score,
    ) -> Self {
        Self {
            initiative_id: initiative_id.into(),
            member_id: member_id.into(),
            scores: Some(scores),
            is_abstain: false,
        }
    }

    /// Create an abstain marker (wire form only - never stored)
    pub fn abstain(initiative_id: impl Into<String>, member_id: impl Into<String>) -> Self {
        Self {
            initiative_id: initiative_id.into(),
            member_id: member_id.into(),
            scores: None,
            is_abstain: true,
        }
    }

    /// Whether this vote contributes to aggregation
    pub fn is_scored(&self) -> bool {
        !self.is_abstain && self.scores.is_some()
    }

    /// Whether this vote belongs to the given `(initiative, member)` pair
    pub fn matches(&self, initiative_id: &str, member_id: &str) -> bool {
        self.initiative_id == initiative_id && self.member_id == member_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(Score::new(1, 1, 1, 1).is_ok());
        assert!(Score::new(5, 5, 5, 5).is_ok());

        let err = Score::new(0, 3, 3, 3).unwrap_err();
        assert_eq!(
            err,
            DomainError::ScoreOutOfRange {
                dimension: "importance",
                value: 0
            }
        );

        let err = Score::new(3, 3, 7, 3).unwrap_err();
        assert_eq!(
            err,
            DomainError::ScoreOutOfRange {
                dimension: "urgency",
                value: 7
            }
        );
    }

    #[test]
    fn test_score_default_is_mid_range() {
        let score = Score::default();
        assert_eq!(score, Score::new(3, 3, 3, 3).unwrap());
    }

    #[test]
    fn test_score_deserialization_validates() {
        let score: Score =
            serde_json::from_str(r#"{"importance":5,"feasibility":4,"urgency":3,"alignment":2}"#)
                .unwrap();
        assert_eq!(score, Score::new(5, 4, 3, 2).unwrap());

        let out_of_range =
            serde_json::from_str::<Score>(r#"{"importance":6,"feasibility":4,"urgency":3,"alignment":2}"#);
        assert!(out_of_range.is_err());
    }

    #[test]
    fn test_vote_constructors() {
        let vote = Vote::new("init-1", "member-1", Score::default());
        assert!(vote.is_scored());
        assert!(vote.matches("init-1", "member-1"));
        assert!(!vote.matches("init-1", "member-2"));

        let marker = Vote::abstain("init-1", "member-1");
        assert!(!marker.is_scored());
        assert!(marker.scores.is_none());
    }

    #[test]
    fn test_vote_wire_shape() {
        let json = r#"{
            "initiativeId": "init-1",
            "memberId": "member-1",
            "scores": {"importance":5,"feasibility":5,"urgency":5,"alignment":5}
        }"#;
        let vote: Vote = serde_json::from_str(json).unwrap();
        assert_eq!(vote.initiative_id, "init-1");
        assert!(!vote.is_abstain);
        assert!(vote.is_scored());
    }
}

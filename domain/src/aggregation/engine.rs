//! The aggregation engine
//!
//! Pure mapping from `(initiatives, votes)` to a ranked result list.
//! Recomputed fresh on every request - results are never stored, so they
//! can never go stale relative to their inputs.

use super::weights::ScoringWeights;
use crate::session::entities::Initiative;
use crate::vote::entities::Vote;
use serde::{Deserialize, Serialize};

/// Aggregated scoring summary for one initiative (derived, never stored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    pub initiative_id: String,
    pub name: String,
    /// Per-dimension averages, rounded to one decimal place for reporting
    pub avg_importance: f64,
    pub avg_feasibility: f64,
    pub avg_urgency: f64,
    pub avg_alignment: f64,
    /// Weighted summary on a 0-100 scale
    pub vector_score: u32,
    pub vote_count: usize,
}

impl AggregatedResult {
    /// The defined zero result for an initiative nobody scored
    fn unscored(initiative: &Initiative) -> Self {
        Self {
            initiative_id: initiative.id.clone(),
            name: initiative.name.clone(),
            avg_importance: 0.0,
            avg_feasibility: 0.0,
            avg_urgency: 0.0,
            avg_alignment: 0.0,
            vector_score: 0,
            vote_count: 0,
        }
    }
}

/// Aggregate with the standard weights (importance 35%, alignment 30%,
/// feasibility 20%, urgency 15%)
pub fn aggregate(initiatives: &[Initiative], votes: &[Vote]) -> Vec<AggregatedResult> {
    aggregate_with_weights(initiatives, votes, &ScoringWeights::default())
}

/// Aggregate the current vote set into a ranked result list
///
/// For each initiative, the matching scored votes are averaged per
/// dimension at full precision, weighted into a raw score, and scaled to
/// 0-100. Rounding is half away from zero (f64::round), which for these
/// strictly positive values is plain half-up. Votes referencing unknown
/// initiatives match nothing and silently drop out; abstain markers are
/// excluded identically to missing votes.
///
/// Results are ordered by vector score, highest first. The sort is stable,
/// so tied initiatives keep their input order. Zero-vote initiatives score
/// 0 and therefore sink to the bottom.
pub fn aggregate_with_weights(
    initiatives: &[Initiative],
    votes: &[Vote],
    weights: &ScoringWeights,
) -> Vec<AggregatedResult> {
    let mut results: Vec<AggregatedResult> = initiatives
        .iter()
        .map(|initiative| score_initiative(initiative, votes, weights))
        .collect();

    results.sort_by(|a, b| b.vector_score.cmp(&a.vector_score));
    results
}

fn score_initiative(
    initiative: &Initiative,
    votes: &[Vote],
    weights: &ScoringWeights,
) -> AggregatedResult {
    let scores: Vec<_> = votes
        .iter()
        .filter(|v| v.initiative_id == initiative.id && v.is_scored())
        .filter_map(|v| v.scores)
        .collect();

    let count = scores.len();
    if count == 0 {
        return AggregatedResult::unscored(initiative);
    }

    // Integer sums keep the averages independent of vote order
    let n = count as f64;
    let avg_importance = scores.iter().map(|s| s.importance as u32).sum::<u32>() as f64 / n;
    let avg_feasibility = scores.iter().map(|s| s.feasibility as u32).sum::<u32>() as f64 / n;
    let avg_urgency = scores.iter().map(|s| s.urgency as u32).sum::<u32>() as f64 / n;
    let avg_alignment = scores.iter().map(|s| s.alignment as u32).sum::<u32>() as f64 / n;

    // Weight the unrounded averages; rounding first would compound error
    let weighted = weights.weighted_sum(avg_importance, avg_feasibility, avg_urgency, avg_alignment);
    let vector_score = (weighted / 5.0).round() as u32;

    AggregatedResult {
        initiative_id: initiative.id.clone(),
        name: initiative.name.clone(),
        avg_importance: round_to_tenth(avg_importance),
        avg_feasibility: round_to_tenth(avg_feasibility),
        avg_urgency: round_to_tenth(avg_urgency),
        avg_alignment: round_to_tenth(avg_alignment),
        vector_score,
        vote_count: count,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::entities::Score;

    fn score(importance: u8, feasibility: u8, urgency: u8, alignment: u8) -> Score {
        Score::new(importance, feasibility, urgency, alignment).unwrap()
    }

    fn uniform(value: u8) -> Score {
        score(value, value, value, value)
    }

    #[test]
    fn test_unanimous_fives_score_100() {
        let initiatives = vec![Initiative::new("x1", "Alpha")];
        let votes = vec![Vote::new("x1", "m1", uniform(5))];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results.len(), 1);

        let top = &results[0];
        assert_eq!(top.initiative_id, "x1");
        assert_eq!(top.avg_importance, 5.0);
        assert_eq!(top.avg_feasibility, 5.0);
        assert_eq!(top.avg_urgency, 5.0);
        assert_eq!(top.avg_alignment, 5.0);
        assert_eq!(top.vector_score, 100);
        assert_eq!(top.vote_count, 1);
    }

    #[test]
    fn test_unanimous_ones_score_20() {
        let initiatives = vec![Initiative::new("x1", "Alpha")];
        let votes = vec![Vote::new("x1", "m1", uniform(1)), Vote::new("x1", "m2", uniform(1))];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results[0].vector_score, 20);
    }

    #[test]
    fn test_split_votes_average_to_60() {
        let initiatives = vec![Initiative::new("x1", "Alpha")];
        let votes = vec![Vote::new("x1", "m1", uniform(1)), Vote::new("x1", "m2", uniform(5))];

        let results = aggregate(&initiatives, &votes);
        let top = &results[0];
        assert_eq!(top.avg_importance, 3.0);
        assert_eq!(top.avg_feasibility, 3.0);
        assert_eq!(top.avg_urgency, 3.0);
        assert_eq!(top.avg_alignment, 3.0);
        assert_eq!(top.vector_score, 60);
        assert_eq!(top.vote_count, 2);
    }

    #[test]
    fn test_zero_votes_floor() {
        let initiatives = vec![
            Initiative::new("x1", "Unscored"),
            Initiative::new("x2", "Scored"),
        ];
        let votes = vec![Vote::new("x2", "m1", uniform(3))];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results[0].initiative_id, "x2");
        assert_eq!(results[0].vector_score, 60);
        assert_eq!(results[1].initiative_id, "x1");
        assert_eq!(results[1].vector_score, 0);
        assert_eq!(results[1].vote_count, 0);
        assert_eq!(results[1].avg_importance, 0.0);
    }

    #[test]
    fn test_orphaned_votes_are_skipped() {
        let initiatives = vec![Initiative::new("x1", "Alpha")];
        let votes = vec![
            Vote::new("deleted-initiative", "m1", uniform(5)),
            Vote::new("x1", "m1", uniform(3)),
        ];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].vote_count, 1);
        assert_eq!(results[0].vector_score, 60);
    }

    #[test]
    fn test_abstain_markers_are_excluded() {
        let initiatives = vec![Initiative::new("x1", "Alpha")];
        // A snapshot transport may deliver abstain markers; they count
        // exactly like a missing vote
        let votes = vec![Vote::abstain("x1", "m1"), Vote::new("x1", "m2", uniform(4))];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results[0].vote_count, 1);
        assert_eq!(results[0].vector_score, 80);
    }

    #[test]
    fn test_deterministic_output() {
        let initiatives = vec![
            Initiative::new("x1", "Alpha"),
            Initiative::new("x2", "Beta"),
        ];
        let votes = vec![
            Vote::new("x1", "m1", score(4, 3, 2, 5)),
            Vote::new("x2", "m1", score(2, 5, 4, 1)),
            Vote::new("x1", "m2", score(1, 1, 5, 3)),
        ];

        let first = aggregate(&initiatives, &votes);
        let second = aggregate(&initiatives, &votes);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_keep_initiative_order() {
        let initiatives = vec![
            Initiative::new("x1", "Alpha"),
            Initiative::new("x2", "Beta"),
            Initiative::new("x3", "Gamma"),
        ];
        let votes = vec![
            Vote::new("x1", "m1", uniform(3)),
            Vote::new("x2", "m1", uniform(3)),
            Vote::new("x3", "m1", uniform(4)),
        ];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results[0].initiative_id, "x3");
        // x1 and x2 both score 60; stable sort keeps input order
        assert_eq!(results[1].initiative_id, "x1");
        assert_eq!(results[2].initiative_id, "x2");
    }

    #[test]
    fn test_half_rounds_up() {
        let initiatives = vec![Initiative::new("x1", "Alpha")];
        // importance averages 1.5: weighted = 1.5*35 + 20 + 15 + 30 = 117.5,
        // vector = round(23.5) = 24
        let votes = vec![
            Vote::new("x1", "m1", score(1, 1, 1, 1)),
            Vote::new("x1", "m2", score(2, 1, 1, 1)),
        ];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results[0].vector_score, 24);
        assert_eq!(results[0].avg_importance, 1.5);
    }

    #[test]
    fn test_reported_averages_round_to_one_decimal() {
        let initiatives = vec![Initiative::new("x1", "Alpha")];
        // importance sums to 10 over 3 votes: 3.333... reported as 3.3
        let votes = vec![
            Vote::new("x1", "m1", score(4, 5, 5, 5)),
            Vote::new("x1", "m2", score(3, 5, 5, 5)),
            Vote::new("x1", "m3", score(3, 5, 5, 5)),
        ];

        let results = aggregate(&initiatives, &votes);
        assert_eq!(results[0].avg_importance, 3.3);
        // The vector score is computed from the unrounded 10/3 average:
        // weighted = 10/3*35 + 100 + 75 + 150 = 441.666..., round(88.33) = 88
        assert_eq!(results[0].vector_score, 88);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(aggregate(&[], &[]).is_empty());

        let initiatives = vec![Initiative::new("x1", "Alpha")];
        let results = aggregate(&initiatives, &[]);
        assert_eq!(results[0].vector_score, 0);
    }
}

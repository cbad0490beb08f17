//! Weighted combination of sub-scores into a match decision.

use serde::{Deserialize, Serialize};

use crate::constants::scoring;

/// Relative weight of each sub-score in the final confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub name: f64,
    pub context: f64,
    pub stats: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name: scoring::NAME_WEIGHT,
            context: scoring::CONTEXT_WEIGHT,
            stats: scoring::STATS_WEIGHT,
        }
    }
}

/// The three independent sub-scores of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub name: f64,
    pub context: f64,
    pub stats: f64,
}

impl SubScores {
    /// Weighted sum, evaluated name, context, stats in that order.
    pub fn weighted(&self, weights: &ScoreWeights) -> f64 {
        self.name * weights.name + self.context * weights.context + self.stats * weights.stats
    }

    /// Fixed audit layout, e.g. `name=1.00, ctx=0.38, stat=0.50`.
    pub fn reasoning(&self) -> String {
        format!(
            "name={:.2}, ctx={:.2}, stat={:.2}",
            self.name, self.context, self.stats
        )
    }
}

/// Outcome of comparing two player records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub confidence: f64,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub reasoning: String,
    pub scores: SubScores,
}

/// Combines sub-scores into a `MatchResult`.
///
/// A pair matches only when the confidence is strictly above `threshold`.
pub fn aggregate(scores: SubScores, weights: &ScoreWeights, threshold: f64) -> MatchResult {
    let confidence = scores.weighted(weights);
    MatchResult {
        confidence,
        is_match: confidence > threshold,
        reasoning: scores.reasoning(),
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(name: f64, context: f64, stats: f64) -> SubScores {
        SubScores {
            name,
            context,
            stats,
        }
    }

    #[test]
    fn test_perfect_scores_give_exactly_one() {
        let result = aggregate(
            scores(1.0, 1.0, 1.0),
            &ScoreWeights::default(),
            scoring::MATCH_THRESHOLD,
        );
        assert_eq!(result.confidence, 1.0);
        assert!(result.is_match);
        assert_eq!(result.reasoning, "name=1.00, ctx=1.00, stat=1.00");
    }

    #[test]
    fn test_threshold_is_strict() {
        let weights = ScoreWeights {
            name: 1.0,
            context: 0.0,
            stats: 0.0,
        };
        let at_threshold = aggregate(scores(0.85, 0.0, 0.0), &weights, 0.85);
        assert_eq!(at_threshold.confidence, 0.85);
        assert!(!at_threshold.is_match);

        let above = aggregate(scores(0.86, 0.0, 0.0), &weights, 0.85);
        assert!(above.is_match);
    }

    #[test]
    fn test_default_weighting() {
        let result = aggregate(
            scores(1.0, 0.5, 0.5),
            &ScoreWeights::default(),
            scoring::MATCH_THRESHOLD,
        );
        assert!((result.confidence - 0.7).abs() < 1e-12);
        assert!(!result.is_match);
    }

    #[test]
    fn test_reasoning_rounds_to_two_decimals() {
        let reasoning = scores(0.9166, 0.3751, -0.25).reasoning();
        assert_eq!(reasoning, "name=0.92, ctx=0.38, stat=-0.25");
    }

    #[test]
    fn test_match_field_serializes_as_match() {
        let result = aggregate(
            scores(1.0, 1.0, 1.0),
            &ScoreWeights::default(),
            scoring::MATCH_THRESHOLD,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["match"], serde_json::Value::Bool(true));
        assert!(json.get("is_match").is_none());
    }
}

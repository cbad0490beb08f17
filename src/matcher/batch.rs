//! Parallel scoring of caller-supplied candidate pairs.
//!
//! Pairs are never discovered here; the caller decides which records to
//! compare. Results keep the input order.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::PlayerMatcher;
use super::aggregate::MatchResult;
use super::record::PlayerRecord;
use crate::constants::scoring::BORDERLINE_MARGIN;

/// Two records to compare, with an optional caller-side identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    /// String or numeric identifier; numbers are kept in their JSON spelling
    #[serde(
        default,
        deserialize_with = "pair_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub left: PlayerRecord,
    pub right: PlayerRecord,
}

fn pair_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

/// Result of one candidate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub result: MatchResult,
}

/// Aggregate counts of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Non-matches within the borderline margin below the threshold
    pub borderline: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Tallies outcomes scored against `threshold`.
    pub fn from_outcomes(outcomes: &[PairOutcome], threshold: f64, elapsed: Duration) -> Self {
        let matched = outcomes.iter().filter(|o| o.result.is_match).count();
        let borderline = outcomes
            .iter()
            .filter(|o| !o.result.is_match && o.result.confidence > threshold - BORDERLINE_MARGIN)
            .count();
        Self {
            total: outcomes.len(),
            matched,
            unmatched: outcomes.len() - matched,
            borderline,
            elapsed,
        }
    }

    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched as f64 / self.total as f64
    }

    pub fn log_summary(&self) {
        tracing::info!("Match batch summary:");
        tracing::info!("  Pairs scored: {}", self.total);
        tracing::info!("  Matched: {}", self.matched);
        tracing::info!("  Unmatched: {}", self.unmatched);
        tracing::info!("  Match rate: {:.2}%", self.match_rate() * 100.0);
        tracing::info!("  Elapsed: {} ms", self.elapsed.as_millis());
        if self.borderline > 0 {
            tracing::warn!(
                "  Borderline non-matches needing review: {}",
                self.borderline
            );
        }
    }
}

impl PlayerMatcher {
    /// Scores every pair in parallel, returning outcomes in input order.
    pub fn match_batch(&self, pairs: &[CandidatePair]) -> Vec<PairOutcome> {
        pairs
            .par_iter()
            .map(|pair| PairOutcome {
                id: pair.id.clone(),
                result: self.match_players(&pair.left, &pair.right),
            })
            .collect()
    }

    /// Scores a batch and returns the summary alongside the outcomes.
    pub fn match_batch_with_summary(
        &self,
        pairs: &[CandidatePair],
    ) -> (Vec<PairOutcome>, BatchSummary) {
        let started = Instant::now();
        let outcomes = self.match_batch(pairs);
        let summary =
            BatchSummary::from_outcomes(&outcomes, self.settings().threshold, started.elapsed());
        (outcomes, summary)
    }
}

//! Season-by-season scoring signature comparison.

use super::record::PlayerRecord;
use crate::constants::NEUTRAL_SCORE;
use crate::constants::stats::MIN_PPG_DENOMINATOR;

/// Relative points-per-game difference of one season, scaled by the first
/// record's value (floored at one point).
///
/// The first record is the reference, so swapping the arguments generally
/// changes the result.
pub fn relative_ppg_difference(ppg1: f64, ppg2: f64) -> f64 {
    (ppg1 - ppg2).abs() / ppg1.max(MIN_PPG_DENOMINATOR)
}

/// Per-season relative differences over the seasons both records report
/// points per game for, in season key order.
///
/// `None` when either record lacks a usable season map or the records share
/// no season keys at all.
pub fn season_differences(p1: &PlayerRecord, p2: &PlayerRecord) -> Option<Vec<f64>> {
    let seasons1 = p1.season_stats()?;
    let seasons2 = p2.season_stats()?;

    let mut shared_any = false;
    let mut diffs = Vec::new();
    for (season, line1) in seasons1 {
        let Some(line2) = seasons2.get(season) else {
            continue;
        };
        shared_any = true;
        if let (Some(ppg1), Some(ppg2)) = (line1.ppg, line2.ppg) {
            diffs.push(relative_ppg_difference(ppg1, ppg2));
        }
    }

    shared_any.then_some(diffs)
}

/// Stat signature sub-score: one minus the mean relative difference.
///
/// Neutral when there is nothing to compare. Not clamped: seasons that differ
/// by more than the reference value push the score below zero.
pub fn stat_score(p1: &PlayerRecord, p2: &PlayerRecord) -> f64 {
    match season_differences(p1, p2) {
        Some(diffs) if !diffs.is_empty() => {
            1.0 - diffs.iter().sum::<f64>() / diffs.len() as f64
        }
        _ => NEUTRAL_SCORE,
    }
}

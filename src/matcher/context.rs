//! Biographical and career-span plausibility checks.

use super::record::PlayerRecord;
use crate::constants::NEUTRAL_SCORE;

/// Inclusive range of season start years a record's career spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareerSpan {
    pub first: i32,
    pub last: i32,
}

impl CareerSpan {
    /// Number of seasons covered; zero when the span runs backwards.
    pub fn len(&self) -> i64 {
        (i64::from(self.last) - i64::from(self.first) + 1).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of seasons covered by both spans.
    pub fn overlap(&self, other: &CareerSpan) -> i64 {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        CareerSpan { first, last }.len()
    }

    /// Jaccard index of the two inclusive year sets, `None` if either is empty.
    pub fn jaccard(&self, other: &CareerSpan) -> Option<f64> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let shared = self.overlap(other);
        let union = self.len() + other.len() - shared;
        Some(shared as f64 / union as f64)
    }
}

/// Extracts the starting year from a season string such as `"1996-97"`.
///
/// Returns `None` for missing, empty or unparsable input.
///
/// # Examples
/// ```
/// use player_dedup::matcher::context::parse_season_start_year;
///
/// assert_eq!(parse_season_start_year(Some("1996-97")), Some(1996));
/// assert_eq!(parse_season_start_year(Some("2003")), Some(2003));
/// assert_eq!(parse_season_start_year(Some("")), None);
/// assert_eq!(parse_season_start_year(Some("n/a")), None);
/// assert_eq!(parse_season_start_year(None), None);
/// ```
pub fn parse_season_start_year(season: Option<&str>) -> Option<i32> {
    let season = season?;
    if season.is_empty() {
        return None;
    }
    season.split('-').next()?.trim().parse().ok()
}

/// Career span of a record; present only when both ends parse.
pub fn career_span(record: &PlayerRecord) -> Option<CareerSpan> {
    let first = parse_season_start_year(record.first_season.as_deref())?;
    let last = parse_season_start_year(record.last_season.as_deref())?;
    Some(CareerSpan { first, last })
}

/// True when both birth years are known and further apart than `max_gap`.
pub fn birth_years_conflict(p1: &PlayerRecord, p2: &PlayerRecord, max_gap: u32) -> bool {
    match (p1.birth_year, p2.birth_year) {
        (Some(b1), Some(b2)) => b1.abs_diff(b2) > max_gap,
        _ => false,
    }
}

/// Context plausibility sub-score of two records.
///
/// A birth year conflict rejects outright. Otherwise career overlap decides:
/// both spans known gives their Jaccard overlap, only one known counts as a
/// mismatch, and neither known is neutral.
pub fn context_score(p1: &PlayerRecord, p2: &PlayerRecord, max_birth_year_gap: u32) -> f64 {
    if birth_years_conflict(p1, p2, max_birth_year_gap) {
        return 0.0;
    }

    match (career_span(p1), career_span(p2)) {
        (Some(span1), Some(span2)) => span1.jaccard(&span2).unwrap_or(NEUTRAL_SCORE),
        (Some(_), None) | (None, Some(_)) => 0.0,
        (None, None) => NEUTRAL_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::scoring::MAX_BIRTH_YEAR_GAP;

    fn with_career(first: &str, last: &str) -> PlayerRecord {
        PlayerRecord {
            first_season: Some(first.to_string()),
            last_season: Some(last.to_string()),
            ..PlayerRecord::default()
        }
    }

    #[test]
    fn test_parse_season_handles_whitespace() {
        assert_eq!(parse_season_start_year(Some(" 1996 -97")), Some(1996));
    }

    #[test]
    fn test_parse_season_rejects_leading_hyphen() {
        assert_eq!(parse_season_start_year(Some("-97")), None);
    }

    #[test]
    fn test_span_overlap_and_jaccard() {
        let a = CareerSpan { first: 1990, last: 2000 };
        let b = CareerSpan { first: 1995, last: 2005 };
        assert_eq!(a.len(), 11);
        assert_eq!(a.overlap(&b), 6);
        assert_eq!(a.jaccard(&b), Some(6.0 / 16.0));
    }

    #[test]
    fn test_disjoint_spans_score_zero() {
        let a = CareerSpan { first: 1960, last: 1970 };
        let b = CareerSpan { first: 1990, last: 2000 };
        assert_eq!(a.overlap(&b), 0);
        assert_eq!(a.jaccard(&b), Some(0.0));
    }

    #[test]
    fn test_backwards_span_is_empty() {
        let backwards = CareerSpan { first: 2000, last: 1990 };
        assert!(backwards.is_empty());
        assert_eq!(backwards.jaccard(&CareerSpan { first: 1990, last: 2000 }), None);
    }

    #[test]
    fn test_birth_year_gap_rejects() {
        let mut p1 = with_career("1990-91", "2000-01");
        let mut p2 = p1.clone();
        p1.birth_year = Some(1970);
        p2.birth_year = Some(1976);
        assert_eq!(context_score(&p1, &p2, MAX_BIRTH_YEAR_GAP), 0.0);
    }

    #[test]
    fn test_birth_year_gap_at_tolerance_is_allowed() {
        let mut p1 = with_career("1990-91", "2000-01");
        let mut p2 = p1.clone();
        p1.birth_year = Some(1970);
        p2.birth_year = Some(1975);
        assert_eq!(context_score(&p1, &p2, MAX_BIRTH_YEAR_GAP), 1.0);
    }

    #[test]
    fn test_one_birth_year_missing_is_not_a_conflict() {
        let mut p1 = PlayerRecord::default();
        p1.birth_year = Some(1950);
        let p2 = PlayerRecord::default();
        assert!(!birth_years_conflict(&p1, &p2, MAX_BIRTH_YEAR_GAP));
        assert_eq!(context_score(&p1, &p2, MAX_BIRTH_YEAR_GAP), NEUTRAL_SCORE);
    }

    #[test]
    fn test_one_sided_range_is_mismatch() {
        let p1 = with_career("1990-91", "2000-01");
        let p2 = PlayerRecord::default();
        assert_eq!(context_score(&p1, &p2, MAX_BIRTH_YEAR_GAP), 0.0);
        assert_eq!(context_score(&p2, &p1, MAX_BIRTH_YEAR_GAP), 0.0);
    }

    #[test]
    fn test_half_parsed_range_counts_as_no_range() {
        let p1 = with_career("1990-91", "unknown");
        let p2 = PlayerRecord::default();
        assert_eq!(context_score(&p1, &p2, MAX_BIRTH_YEAR_GAP), NEUTRAL_SCORE);
    }

    #[test]
    fn test_backwards_range_is_neutral() {
        let p1 = with_career("2000-01", "1990-91");
        let p2 = with_career("1990-91", "2000-01");
        assert_eq!(context_score(&p1, &p2, MAX_BIRTH_YEAR_GAP), NEUTRAL_SCORE);
    }
}

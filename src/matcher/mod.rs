//! Player record matching engine.
//!
//! Decides whether two player records from different sources describe the
//! same person by combining three independent signals:
//! - `names`: nickname-aware full name similarity
//! - `context`: birth year plausibility and career span overlap
//! - `stats`: agreement of season-by-season points per game
//!
//! `aggregate` folds them into a weighted confidence and a match decision.
//! The matcher is immutable once built and can be shared freely across
//! threads; `batch` scores caller-supplied pairs in parallel.

pub mod aggregate;
pub mod batch;
pub mod context;
pub mod names;
pub mod record;
pub mod stats;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use aggregate::{MatchResult, ScoreWeights, SubScores};
pub use batch::{BatchSummary, CandidatePair, PairOutcome};
pub use names::{AliasLookup, ExactMatch, NameSimilarity, NicknameTable, TokenSortRatio};
pub use record::{PlayerRecord, SeasonLine, Seasons};

use crate::constants::scoring;

/// Which name similarity strategy a matcher uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameComparator {
    /// Edit distance ratio over token-sorted names
    #[default]
    TokenSort,
    /// Case-insensitive equality only
    Exact,
}

impl NameComparator {
    fn strategy(self) -> Arc<dyn NameSimilarity> {
        match self {
            NameComparator::TokenSort => Arc::new(TokenSortRatio),
            NameComparator::Exact => Arc::new(ExactMatch),
        }
    }
}

impl std::str::FromStr for NameComparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token_sort" | "token-sort" => Ok(NameComparator::TokenSort),
            "exact" => Ok(NameComparator::Exact),
            other => Err(format!(
                "unknown name comparator '{other}' (expected 'token_sort' or 'exact')"
            )),
        }
    }
}

/// Numeric knobs of the matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSettings {
    pub weights: ScoreWeights,
    /// Confidence must exceed this to be a match
    pub threshold: f64,
    /// Largest tolerated birth year difference
    pub max_birth_year_gap: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            threshold: scoring::MATCH_THRESHOLD,
            max_birth_year_gap: scoring::MAX_BIRTH_YEAR_GAP,
        }
    }
}

/// Scores pairs of player records.
#[derive(Clone)]
pub struct PlayerMatcher {
    settings: MatchSettings,
    aliases: Arc<dyn AliasLookup>,
    similarity: Arc<dyn NameSimilarity>,
}

impl fmt::Debug for PlayerMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerMatcher")
            .field("settings", &self.settings)
            .field("similarity", &self.similarity.name())
            .finish_non_exhaustive()
    }
}

impl Default for PlayerMatcher {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PlayerMatcher {
    /// Matcher with default weights, threshold and nickname table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> PlayerMatcherBuilder {
        PlayerMatcherBuilder::default()
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Identifier of the active name similarity strategy.
    pub fn similarity_name(&self) -> &'static str {
        self.similarity.name()
    }

    /// Returns the likelihood that two player records refer to the same person.
    ///
    /// Never fails: missing or malformed fields only pull their sub-score
    /// towards neutral.
    pub fn match_players(&self, p1: &PlayerRecord, p2: &PlayerRecord) -> MatchResult {
        let scores = self.sub_scores(p1, p2);
        let result = aggregate::aggregate(scores, &self.settings.weights, self.settings.threshold);
        tracing::debug!(
            left = %names::normalized_full_name(p1, self.aliases.as_ref()),
            right = %names::normalized_full_name(p2, self.aliases.as_ref()),
            confidence = result.confidence,
            is_match = result.is_match,
            "{}",
            result.reasoning
        );
        result
    }

    /// The three sub-scores without aggregation.
    pub fn sub_scores(&self, p1: &PlayerRecord, p2: &PlayerRecord) -> SubScores {
        SubScores {
            name: self.name_score(p1, p2),
            context: self.context_score(p1, p2),
            stats: self.stat_score(p1, p2),
        }
    }

    pub fn name_score(&self, p1: &PlayerRecord, p2: &PlayerRecord) -> f64 {
        names::name_score(p1, p2, self.aliases.as_ref(), self.similarity.as_ref())
    }

    pub fn context_score(&self, p1: &PlayerRecord, p2: &PlayerRecord) -> f64 {
        context::context_score(p1, p2, self.settings.max_birth_year_gap)
    }

    pub fn stat_score(&self, p1: &PlayerRecord, p2: &PlayerRecord) -> f64 {
        stats::stat_score(p1, p2)
    }
}

/// Builder for [`PlayerMatcher`].
#[derive(Default)]
pub struct PlayerMatcherBuilder {
    settings: MatchSettings,
    aliases: Option<Arc<dyn AliasLookup>>,
    similarity: Option<Arc<dyn NameSimilarity>>,
    comparator: NameComparator,
}

impl PlayerMatcherBuilder {
    pub fn settings(mut self, settings: MatchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.settings.weights = weights;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.settings.threshold = threshold;
        self
    }

    pub fn max_birth_year_gap(mut self, years: u32) -> Self {
        self.settings.max_birth_year_gap = years;
        self
    }

    /// Replaces the built-in nickname table.
    pub fn aliases(mut self, aliases: impl AliasLookup + 'static) -> Self {
        self.aliases = Some(Arc::new(aliases));
        self
    }

    pub fn comparator(mut self, comparator: NameComparator) -> Self {
        self.comparator = comparator;
        self.similarity = None;
        self
    }

    /// Uses a custom similarity strategy instead of a built-in comparator.
    pub fn similarity(mut self, similarity: impl NameSimilarity + 'static) -> Self {
        self.similarity = Some(Arc::new(similarity));
        self
    }

    pub fn build(self) -> PlayerMatcher {
        let similarity = self
            .similarity
            .unwrap_or_else(|| self.comparator.strategy());
        if similarity.is_fallback() {
            tracing::warn!(
                "Fuzzy name comparison disabled; using exact case-insensitive name compare. \
                 Nicknames still resolve, but spelling variants will not match."
            );
        }
        let aliases: Arc<dyn AliasLookup> = match self.aliases {
            Some(aliases) => aliases,
            None => names::default_aliases(),
        };

        PlayerMatcher {
            settings: self.settings,
            aliases,
            similarity,
        }
    }
}

//! Application-wide constants and default matcher settings
//!
//! This module centralizes the scoring weights, decision threshold and other
//! magic numbers so that configuration defaults and the engine agree.

/// Score returned when a signal carries no usable evidence either way
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Default scoring weights and decision threshold
pub mod scoring {
    /// Weight of the name similarity sub-score
    pub const NAME_WEIGHT: f64 = 0.4;

    /// Weight of the biographical/career context sub-score
    pub const CONTEXT_WEIGHT: f64 = 0.4;

    /// Weight of the stat signature sub-score
    pub const STATS_WEIGHT: f64 = 0.2;

    /// Confidence must be strictly greater than this to count as a match
    pub const MATCH_THRESHOLD: f64 = 0.85;

    /// Largest birth year difference still considered the same person
    pub const MAX_BIRTH_YEAR_GAP: u32 = 5;

    /// Confidence band below the threshold reported as borderline in batch summaries
    pub const BORDERLINE_MARGIN: f64 = 0.1;
}

/// Statistical signature constants
pub mod stats {
    /// Key of the per-season stat used for the signature
    pub const PPG_KEY: &str = "ppg";

    /// Floor for the relative difference denominator
    pub const MIN_PPG_DENOMINATOR: f64 = 1.0;
}

/// Nickname aliases known without any configuration: (nickname, legal first name)
pub const DEFAULT_NICKNAMES: &[(&str, &str)] = &[
    ("Magic", "Earvin"),
    ("Dr. J", "Julius"),
    ("Pistol Pete", "Pete"),
    ("The Big O", "Oscar"),
];

/// Environment variable names that override config file values
pub mod env_vars {
    pub const MATCH_THRESHOLD: &str = "PLAYER_DEDUP_MATCH_THRESHOLD";
    pub const NICKNAME_FILE: &str = "PLAYER_DEDUP_NICKNAMES";
    pub const LOG_FILE: &str = "PLAYER_DEDUP_LOG_FILE";
    pub const NAME_COMPARATOR: &str = "PLAYER_DEDUP_NAME_COMPARATOR";
}

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "player_dedup";

/// Default log file name
pub const LOG_FILE_NAME: &str = "player_dedup.log";

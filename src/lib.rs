//! Player record matching for multi-source deduplication
//!
//! This library decides whether two player records coming from independently
//! maintained data sources refer to the same real-world person, despite
//! nicknames, spelling variants, missing fields and uneven season coverage.
//!
//! # Examples
//!
//! ```rust
//! use player_dedup::matcher::{PlayerMatcher, PlayerRecord};
//!
//! let mut magic = PlayerRecord::new("Magic", "Johnson");
//! magic.birth_year = Some(1959);
//! magic.first_season = Some("1979-80".to_string());
//! magic.last_season = Some("1995-96".to_string());
//!
//! let mut earvin = PlayerRecord::new("Earvin", "Johnson");
//! earvin.birth_year = Some(1959);
//! earvin.first_season = Some("1979-80".to_string());
//! earvin.last_season = Some("1995-96".to_string());
//!
//! let result = PlayerMatcher::new().match_players(&magic, &earvin);
//! assert!(result.is_match);
//! assert_eq!(result.reasoning, "name=1.00, ctx=1.00, stat=0.50");
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod matcher;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use matcher::{
    BatchSummary, CandidatePair, MatchResult, MatchSettings, NameComparator, NicknameTable,
    PairOutcome, PlayerMatcher, PlayerRecord, ScoreWeights,
};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

use crate::constants::{LOG_FILE_NAME, env_vars, scoring};
use crate::error::AppError;
use crate::matcher::names::{DEFAULT_NICKNAME_TABLE, NicknameTable};
use crate::matcher::{MatchSettings, NameComparator, PlayerMatcher, ScoreWeights};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

pub mod paths;
pub mod validation;

use paths::get_log_dir_path;
use validation::validate_config;

/// Matcher and logging settings.
/// Every field has a default, so an empty or missing config file is valid.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Weight of the name similarity sub-score
    #[serde(default = "default_name_weight")]
    pub name_weight: f64,
    /// Weight of the birth year / career overlap sub-score
    #[serde(default = "default_context_weight")]
    pub context_weight: f64,
    /// Weight of the points-per-game signature sub-score
    #[serde(default = "default_stats_weight")]
    pub stats_weight: f64,
    /// Confidence must be strictly above this for a match
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    /// Largest birth year difference tolerated between two records
    #[serde(default = "default_max_birth_year_gap")]
    pub max_birth_year_gap: u32,
    /// Name similarity strategy: "token_sort" or "exact"
    #[serde(default)]
    pub name_comparator: NameComparator,
    /// Extra nickname table layered over the built-in aliases
    #[serde(default)]
    pub nickname_file: Option<String>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default)]
    pub log_file_path: Option<String>,
}

fn default_name_weight() -> f64 {
    scoring::NAME_WEIGHT
}

fn default_context_weight() -> f64 {
    scoring::CONTEXT_WEIGHT
}

fn default_stats_weight() -> f64 {
    scoring::STATS_WEIGHT
}

fn default_match_threshold() -> f64 {
    scoring::MATCH_THRESHOLD
}

fn default_max_birth_year_gap() -> u32 {
    scoring::MAX_BIRTH_YEAR_GAP
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name_weight: default_name_weight(),
            context_weight: default_context_weight(),
            stats_weight: default_stats_weight(),
            match_threshold: default_match_threshold(),
            max_birth_year_gap: default_max_birth_year_gap(),
            name_comparator: NameComparator::default(),
            nickname_file: None,
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist. Environment variables override file values.
    ///
    /// # Environment Variables
    /// - `PLAYER_DEDUP_MATCH_THRESHOLD` - Override the match threshold
    /// - `PLAYER_DEDUP_NICKNAMES` - Override the nickname file path
    /// - `PLAYER_DEDUP_LOG_FILE` - Override log file path
    /// - `PLAYER_DEDUP_NAME_COMPARATOR` - Override the name comparator
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded (or defaulted) configuration
    /// * `Err(AppError)` - The file is unreadable, malformed or fails validation
    pub async fn load_or_default(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            tracing::debug!("No config file at {path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `PLAYER_DEDUP_*` environment variables on top of the current values.
    /// Unparsable values are logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(env_vars::MATCH_THRESHOLD) {
            match raw.trim().parse::<f64>() {
                Ok(threshold) => self.match_threshold = threshold,
                Err(_) => tracing::warn!(
                    "Ignoring {}={raw}: not a number",
                    env_vars::MATCH_THRESHOLD
                ),
            }
        }

        if let Ok(nickname_file) = std::env::var(env_vars::NICKNAME_FILE) {
            self.nickname_file = Some(nickname_file);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Ok(raw) = std::env::var(env_vars::NAME_COMPARATOR) {
            match raw.parse::<NameComparator>() {
                Ok(comparator) => self.name_comparator = comparator,
                Err(e) => tracing::warn!("Ignoring {}: {e}", env_vars::NAME_COMPARATOR),
            }
        }
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AppError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Scoring weights as configured.
    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            name: self.name_weight,
            context: self.context_weight,
            stats: self.stats_weight,
        }
    }

    /// Numeric matcher settings as configured.
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            weights: self.weights(),
            threshold: self.match_threshold,
            max_birth_year_gap: self.max_birth_year_gap,
        }
    }

    /// Builds a matcher from this configuration.
    ///
    /// The nickname file, when configured, is layered over the built-in aliases.
    pub async fn build_matcher(&self) -> Result<PlayerMatcher, AppError> {
        let mut builder = PlayerMatcher::builder()
            .settings(self.match_settings())
            .comparator(self.name_comparator);

        if let Some(nickname_file) = &self.nickname_file {
            let extra = NicknameTable::load_from_path(nickname_file).await?;
            builder = builder.aliases(DEFAULT_NICKNAME_TABLE.merged_with(&extra));
        }

        Ok(builder.build())
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays the effective configuration to stdout.
    ///
    /// # Arguments
    /// * `config_path` - Where the configuration was looked up
    pub fn display(&self, config_path: &str) {
        let log_dir = get_log_dir_path();

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !Path::new(config_path).exists() {
            println!("(Not found, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("Weights (name / context / stats):");
        println!(
            "{:.2} / {:.2} / {:.2}",
            self.name_weight, self.context_weight, self.stats_weight
        );
        println!("────────────────────────────────────");
        println!("Match Threshold:");
        println!("> {:.2}", self.match_threshold);
        println!("────────────────────────────────────");
        println!("Max Birth Year Gap:");
        println!("{} years", self.max_birth_year_gap);
        println!("────────────────────────────────────");
        println!("Name Comparator:");
        match self.name_comparator {
            NameComparator::TokenSort => println!("token_sort"),
            NameComparator::Exact => println!("exact (coarse fallback)"),
        }
        println!("────────────────────────────────────");
        println!("Nickname File:");
        match &self.nickname_file {
            Some(path) => println!("{path}"),
            None => println!("(Built-in aliases only)"),
        }
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{LOG_FILE_NAME}");
            println!("(Default location)");
        }
    }

    /// Loads configuration from a file path without env overrides or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::RecordBuilder;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::remove_var(env_vars::MATCH_THRESHOLD);
            std::env::remove_var(env_vars::NICKNAME_FILE);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::NAME_COMPARATOR);
        }
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
match_threshold = 0.9
name_comparator = "exact"
log_file_path = "/custom/log/path"
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.match_threshold, 0.9);
        assert_eq!(config.name_comparator, NameComparator::Exact);
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.name_weight, scoring::NAME_WEIGHT);
        assert_eq!(config.max_birth_year_gap, scoring::MAX_BIRTH_YEAR_GAP);
    }

    #[tokio::test]
    async fn test_config_empty_file_gives_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_config_load_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "match_threshold = [").await.unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_unknown_comparator_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "name_comparator = \"soundex\"")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_load_or_default_missing_file_uses_defaults() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("missing.toml");

        let config = Config::load_or_default(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_file_values() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "match_threshold = 0.9\n")
            .await
            .unwrap();

        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::MATCH_THRESHOLD, "0.75");
            std::env::set_var(env_vars::NAME_COMPARATOR, "exact");
        }
        let config = Config::load_or_default(&config_path.to_string_lossy())
            .await
            .unwrap();
        clear_env();

        assert_eq!(config.match_threshold, 0.75);
        assert_eq!(config.name_comparator, NameComparator::Exact);
    }

    #[tokio::test]
    #[serial]
    async fn test_unparsable_env_override_is_ignored() {
        clear_env();
        let mut config = Config::default();
        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::MATCH_THRESHOLD, "high");
        }
        config.apply_env_overrides();
        clear_env();

        assert_eq!(config.match_threshold, scoring::MATCH_THRESHOLD);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_or_default_validates() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "name_weight = -1.0\n")
            .await
            .unwrap();

        let result = Config::load_or_default(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::Config(_)));
    }

    #[test]
    fn test_match_settings_mirror_config() {
        let config = Config {
            name_weight: 0.5,
            context_weight: 0.3,
            stats_weight: 0.2,
            match_threshold: 0.7,
            max_birth_year_gap: 2,
            ..Config::default()
        };
        let settings = config.match_settings();
        assert_eq!(settings.weights.name, 0.5);
        assert_eq!(settings.weights.context, 0.3);
        assert_eq!(settings.threshold, 0.7);
        assert_eq!(settings.max_birth_year_gap, 2);
    }

    #[test]
    fn test_default_match_settings_equal_engine_defaults() {
        assert_eq!(Config::default().match_settings(), MatchSettings::default());
    }

    #[tokio::test]
    async fn test_build_matcher_layers_nickname_file() {
        let temp_dir = tempdir().unwrap();
        let nickname_path = temp_dir.path().join("nicknames.toml");
        tokio::fs::write(&nickname_path, "[nicknames]\n\"Penny\" = \"Anfernee\"\n")
            .await
            .unwrap();

        let config = Config {
            nickname_file: Some(nickname_path.to_string_lossy().to_string()),
            ..Config::default()
        };
        let matcher = config.build_matcher().await.unwrap();

        let penny = RecordBuilder::new("Penny", "Hardaway").build();
        let anfernee = RecordBuilder::new("Anfernee", "Hardaway").build();
        assert_eq!(matcher.name_score(&penny, &anfernee), 1.0);

        let magic = RecordBuilder::new("Magic", "Johnson").build();
        let earvin = RecordBuilder::new("Earvin", "Johnson").build();
        assert_eq!(matcher.name_score(&magic, &earvin), 1.0);
    }

    #[tokio::test]
    async fn test_build_matcher_missing_nickname_file() {
        let config = Config {
            nickname_file: Some("/nonexistent/nicknames.toml".to_string()),
            ..Config::default()
        };
        let result = config.build_matcher().await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_get_config_path() {
        let config_path = Config::get_config_path();
        assert!(config_path.ends_with("config.toml"));
        assert!(config_path.contains("player_dedup"));
    }

    #[test]
    fn test_get_log_dir_path() {
        let log_dir = Config::get_log_dir_path();
        assert!(log_dir.contains("player_dedup"));
        assert!(log_dir.ends_with("logs"));
    }
}

use crate::config::Config;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Weights must be finite and non-negative, and not all zero
/// - The match threshold must be finite
/// - If a nickname file is provided, its path cannot be empty
/// - If a log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    let weights = [
        ("name_weight", config.name_weight),
        ("context_weight", config.context_weight),
        ("stats_weight", config.stats_weight),
    ];
    for (key, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::config_error(format!(
                "{key} must be a non-negative number, got {weight}"
            )));
        }
    }
    if weights.iter().all(|(_, weight)| *weight == 0.0) {
        return Err(AppError::config_error("At least one weight must be positive"));
    }

    if !config.match_threshold.is_finite() {
        return Err(AppError::config_error(format!(
            "match_threshold must be a finite number, got {}",
            config.match_threshold
        )));
    }

    if let Some(nickname_file) = &config.nickname_file
        && nickname_file.trim().is_empty()
    {
        return Err(AppError::config_error("Nickname file path cannot be empty"));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let config = Config {
            stats_weight: -0.2,
            ..Config::default()
        };
        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("stats_weight"));
    }

    #[test]
    fn test_nan_weight_is_rejected() {
        let config = Config {
            name_weight: f64::NAN,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_all_zero_weights_are_rejected() {
        let config = Config {
            name_weight: 0.0,
            context_weight: 0.0,
            stats_weight: 0.0,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_single_signal_weighting_is_allowed() {
        let config = Config {
            name_weight: 1.0,
            context_weight: 0.0,
            stats_weight: 0.0,
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_infinite_threshold_is_rejected() {
        let config = Config {
            match_threshold: f64::INFINITY,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_paths_are_rejected() {
        let config = Config {
            nickname_file: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            log_file_path: Some(String::new()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_log_directory_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("logs").join("dedup.log");
        let config = Config {
            log_file_path: Some(log_path.to_string_lossy().to_string()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
        assert!(temp_dir.path().join("logs").exists());
    }
}

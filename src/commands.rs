use crate::cli::Args;
use player_dedup::config::Config;
use player_dedup::error::AppError;
use player_dedup::input::{read_pairs, read_record};
use player_dedup::matcher::{PairOutcome, PlayerMatcher};

/// Exit status for a failed run: 2 for bad input files, 1 for everything else.
pub fn exit_status(error: &AppError) -> u8 {
    if error.is_input_error() { 2 } else { 1 }
}

/// Resolves the config file location from `--config` or the platform default.
pub fn config_path(args: &Args) -> String {
    args.config_path
        .clone()
        .unwrap_or_else(Config::get_config_path)
}

/// Loads configuration and applies command line overrides on top of it.
///
/// Precedence: command line, then environment, then config file, then defaults.
pub async fn load_effective_config(args: &Args) -> Result<Config, AppError> {
    let mut config = Config::load_or_default(&config_path(args)).await?;

    if let Some(nickname_file) = &args.nickname_file {
        config.nickname_file = Some(nickname_file.clone());
    }
    if let Some(threshold) = args.threshold {
        config.match_threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

/// Handles the --list-config command.
pub fn handle_list_config_command(args: &Args, config: &Config) {
    config.display(&config_path(args));
}

/// Handles the `pair` command: scores two record files and prints the result.
pub async fn handle_pair_command(
    matcher: &PlayerMatcher,
    left: &str,
    right: &str,
) -> Result<(), AppError> {
    let left_record = read_record(left).await?;
    let right_record = read_record(right).await?;

    let result = matcher.match_players(&left_record, &right_record);
    tracing::info!(
        "{left} vs {right}: confidence={:.4} match={} ({})",
        result.confidence,
        result.is_match,
        result.reasoning
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Handles the `batch` command.
///
/// Scoring runs on the rayon pool from a blocking task so the runtime stays free.
pub async fn handle_batch_command(
    matcher: &PlayerMatcher,
    pairs_path: &str,
    matches_only: bool,
) -> Result<(), AppError> {
    let pairs = read_pairs(pairs_path).await?;

    let batch_matcher = matcher.clone();
    let (outcomes, summary) =
        tokio::task::spawn_blocking(move || batch_matcher.match_batch_with_summary(&pairs))
            .await?;

    summary.log_summary();

    let printed: Vec<&PairOutcome> = outcomes
        .iter()
        .filter(|outcome| !matches_only || outcome.result.is_match)
        .collect();
    println!("{}", serde_json::to_string_pretty(&printed)?);
    Ok(())
}

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Player record matcher
///
/// Scores whether player records from different data sources describe the
/// same person, combining nickname-aware name similarity, birth year and
/// career span plausibility, and season scoring signatures.
///
/// Records are JSON objects with `first_name`, `last_name`, `birth_year`,
/// `first_season`, `last_season` and `seasons` (season -> { "ppg": ... }).
/// Results are printed to stdout as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Read settings from this config file instead of the default location.
    #[arg(long = "config", global = true, help_heading = "Configuration")]
    pub config_path: Option<String>,

    /// Extra nickname table (TOML) layered over the built-in aliases.
    #[arg(long = "nicknames", global = true, help_heading = "Configuration")]
    pub nickname_file: Option<String>,

    /// Override the match threshold (confidence must be strictly above it).
    #[arg(long = "threshold", global = true, help_heading = "Configuration")]
    pub threshold: Option<f64>,

    /// Show the effective configuration and exit.
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Mirror log output to stderr in addition to the log file.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compare two records, each stored as a JSON object in its own file.
    Pair {
        /// First record; its stats are the reference for the stat signature.
        left: String,
        /// Second record.
        right: String,
    },
    /// Compare every pair in a JSON array of {"id", "left", "right"} objects.
    Batch {
        /// File holding the candidate pairs.
        pairs: String,
        /// Only print pairs that matched.
        #[arg(long = "matches-only")]
        matches_only: bool,
    },
}

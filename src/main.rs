// src/main.rs
mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Args, Command};
use commands::{
    exit_status, handle_batch_command, handle_list_config_command, handle_pair_command,
    load_effective_config,
};
use logging::setup_logging;
use player_dedup::error::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn run(args: &Args) -> Result<(), AppError> {
    let config = load_effective_config(args).await?;

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = setup_logging(args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        handle_list_config_command(args, &config);
        return Ok(());
    }

    let Some(command) = &args.command else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    let matcher = config.build_matcher().await?;
    tracing::debug!("Using {matcher:?}");

    match command {
        Command::Pair { left, right } => handle_pair_command(&matcher, left, right).await,
        Command::Batch {
            pairs,
            matches_only,
        } => handle_batch_command(&matcher, pairs, *matches_only).await,
    }
}

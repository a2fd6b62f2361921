//! clawover - model failover utility for OpenClaw.
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use clawover::cli::{Cli, Commands};
use clawover::core::driver::Outcome;
use clawover::core::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.log_level.as_deref(), cli.json_output, cli.verbose);

    if !clawover::util::env::should_use_color(cli.no_color) {
        colored::control::set_override(false);
    }

    let result = run(cli).await;

    match result {
        Ok(outcome) => ExitCode::from(outcome.exit_code() as u8),
        Err(e) => {
            tracing::debug!("{}", e);
            eprintln!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> clawover::Result<Outcome> {
    match cli.command {
        Commands::DefaultModel(args) => clawover::cli::default_model::execute(&args).await,
        Commands::Session(args) => clawover::cli::session::execute(&args).await,
    }
}

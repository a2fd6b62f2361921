//! `default-model` command: probe candidates and update the global default.

use std::time::Duration;

use crate::cli::args::DefaultModelArgs;
use crate::core::candidate::parse_candidates;
use crate::core::driver::{self, Outcome};
use crate::core::{http, probe};
use crate::error::{ClawoverError, Result};
use crate::storage::global_config::GlobalConfig;
use crate::storage::paths;

/// Execute the command and report the terminal outcome.
///
/// # Errors
///
/// Returns configuration errors for blank or unparseable candidate input and
/// internal faults from loading or persisting the config.
pub async fn execute(args: &DefaultModelArgs) -> Result<Outcome> {
    if args.models.trim().is_empty() {
        return Err(ClawoverError::MissingModels);
    }
    let candidates = parse_candidates(&args.models);
    if candidates.is_empty() {
        return Err(ClawoverError::NoValidCandidates);
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(paths::default_config_path);
    let mut target = GlobalConfig::load(&config_path)?;

    let timeout = Duration::from_millis(args.timeout);
    let client = http::build_client(timeout)?;

    println!(
        "Probing {} candidate default models with {}ms timeout",
        candidates.len(),
        args.timeout
    );

    let outcome = driver::run_selection(
        &mut target,
        &candidates,
        |candidate| {
            let client = client.clone();
            async move { probe::probe(&client, &candidate, timeout).await }
        },
        args.backup_dir.as_deref(),
    )
    .await?;

    match &outcome {
        Outcome::Applied(winner) => {
            println!(
                "Updated default model in {} -> {}",
                config_path.display(),
                winner
            );
        }
        Outcome::AlreadyCurrent(winner) => {
            println!(
                "Default model in {} already set to {}",
                config_path.display(),
                winner
            );
        }
        Outcome::Reset | Outcome::Unchanged => {
            println!("No candidates succeeded; leaving config unchanged");
        }
    }

    Ok(outcome)
}

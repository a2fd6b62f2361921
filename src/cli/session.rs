//! `session` command: probe candidates and update one session's override.

use std::time::Duration;

use crate::cli::args::SessionArgs;
use crate::core::candidate::parse_candidates;
use crate::core::driver::{self, Outcome};
use crate::core::{http, probe};
use crate::error::{ClawoverError, Result};
use crate::storage::paths;
use crate::storage::session_store::SessionTarget;

/// Execute the command and report the terminal outcome.
///
/// # Errors
///
/// Returns configuration errors for blank input, unparseable candidates, and
/// a missing store or session key; internal faults from persistence.
pub async fn execute(args: &SessionArgs) -> Result<Outcome> {
    if args.session_key.trim().is_empty() {
        return Err(ClawoverError::MissingSessionKey);
    }
    if args.models.trim().is_empty() {
        return Err(ClawoverError::MissingModels);
    }
    let candidates = parse_candidates(&args.models);
    if candidates.is_empty() {
        return Err(ClawoverError::NoValidSessionCandidates);
    }

    let store_path = args.store.clone().unwrap_or_else(paths::default_store_path);
    let mut target = SessionTarget::open(&store_path, &args.session_key)?;

    let timeout = Duration::from_millis(args.timeout);
    let client = http::build_client(timeout)?;

    println!(
        "Probing {} model(s) for session {} with {}ms timeout",
        candidates.len(),
        args.session_key,
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
                "Applied override {} to {} in {}",
                winner,
                args.session_key,
                store_path.display()
            );
        }
        Outcome::AlreadyCurrent(_) => {
            println!("No change required for {}", args.session_key);
        }
        Outcome::Reset => {
            println!(
                "No candidate succeeded; reset overrides for {}",
                args.session_key
            );
        }
        Outcome::Unchanged => {
            println!(
                "No changes made (none of the candidates were available and overrides were already default)"
            );
        }
    }

    Ok(outcome)
}

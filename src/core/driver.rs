//! Selection driver: the probe-and-apply loop shared by both commands.
//!
//! Candidates are probed strictly in order and the loop short-circuits at the
//! first success; later candidates are never probed. When the list is
//! exhausted the target decides what "fall back to default" means for its
//! shape (session entries reset, the global config stays put). Persistence
//! happens at most once per run, and only when the policy reports an actual
//! change.

use std::future::Future;
use std::io::Write as _;
use std::path::Path;

use colored::Colorize as _;

use crate::core::candidate::ModelRef;
use crate::core::policy::Selection;
use crate::error::{ExitCode, Result};
use crate::storage::persist;

/// A uniform view over the thing being updated.
///
/// Implemented by the global config document and by one entry of the session
/// store. `decide` only computes the new in-memory state; the driver owns the
/// backup-then-write step so the policy stays testable without I/O.
pub trait FailoverTarget {
    /// Currently recorded selection, if any.
    fn current_selection(&self) -> Option<ModelRef>;

    /// Apply `selection` to the in-memory state. Returns whether anything
    /// changed; `false` means no write should occur.
    fn decide(&mut self, selection: &Selection) -> Result<bool>;

    /// Full backing document to persist.
    fn document(&self) -> serde_json::Value;

    /// Path of the backing file.
    fn path(&self) -> &Path;
}

/// Terminal outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A candidate won and the target was rewritten.
    Applied(ModelRef),
    /// A candidate won but the target already recorded it; nothing written.
    AlreadyCurrent(ModelRef),
    /// No candidate available; overrides were removed.
    Reset,
    /// No candidate available and nothing to remove; nothing written.
    Unchanged,
}

impl Outcome {
    /// Exit code reported for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Applied(_) | Self::AlreadyCurrent(_) => ExitCode::Success,
            Self::Reset | Self::Unchanged => ExitCode::Unavailable,
        }
    }
}

/// Run one selection pass over `candidates` against `target`.
///
/// `probe` is any async candidate check resolving to a boolean; production
/// wires in [`crate::core::probe::probe`], tests substitute canned results.
///
/// # Errors
///
/// Returns an error when applying or persisting the decision fails. Probe
/// failures are not errors; they read as "unavailable".
pub async fn run_selection<T, P, Fut>(
    target: &mut T,
    candidates: &[ModelRef],
    probe: P,
    backup_dir: Option<&Path>,
) -> Result<Outcome>
where
    T: FailoverTarget,
    P: Fn(ModelRef) -> Fut,
    Fut: Future<Output = bool>,
{
    for candidate in candidates {
        print!("Checking {candidate} ... ");
        let _ = std::io::stdout().flush();

        if probe(candidate.clone()).await {
            println!("{}", "ok".green());
            return apply_winner(target, candidate, backup_dir);
        }
        println!("{}", "failed".red());
    }

    if target.decide(&Selection::Default)? {
        persist::save(target.path(), &target.document(), backup_dir)?;
        Ok(Outcome::Reset)
    } else {
        Ok(Outcome::Unchanged)
    }
}

fn apply_winner<T: FailoverTarget>(
    target: &mut T,
    winner: &ModelRef,
    backup_dir: Option<&Path>,
) -> Result<Outcome> {
    tracing::debug!(
        current = ?target.current_selection().map(|c| c.to_string()),
        winner = %winner,
        "applying selection"
    );

    if target.decide(&Selection::Winner(winner.clone()))? {
        persist::save(target.path(), &target.document(), backup_dir)?;
        Ok(Outcome::Applied(winner.clone()))
    } else {
        Ok(Outcome::AlreadyCurrent(winner.clone()))
    }
}

//! Error types for clawover.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! Configuration errors stop the run before any mutation and each cause has
//! its own exit code. Probe failures are never errors at all; they fold into
//! "unavailable" inside the probe loop. Persistence failures surface as
//! internal faults because there is no safe partial state once a decision to
//! write has been made.

use thiserror::Error;

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes for failover runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Selection applied, or the target already recorded it.
    Success = 0,
    /// No candidate was available; overrides reset, or nothing to reset.
    Unavailable = 1,
    /// Required input missing or blank.
    UsageError = 2,
    /// No valid candidates (default-model mode), or session store/key not found.
    ConfigError = 3,
    /// No valid candidates (session mode).
    CandidateError = 4,
    /// Unhandled internal fault.
    Internal = 10,
}

impl From<ExitCode> for u8 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

// =============================================================================
// Error Type
// =============================================================================

/// Main error type for clawover operations.
#[derive(Error, Debug)]
pub enum ClawoverError {
    /// No candidate list was provided, or it was blank.
    #[error("--models is required (comma-separated provider/model list)")]
    MissingModels,

    /// No session key was provided, or it was blank.
    #[error("--session-key is required")]
    MissingSessionKey,

    /// Every token in the candidate list was malformed (default-model mode).
    #[error("no valid model candidates provided")]
    NoValidCandidates,

    /// Every token in the candidate list was malformed (session mode).
    #[error("no valid model candidates provided for session failover")]
    NoValidSessionCandidates,

    /// The session store file does not exist; there is nothing to override.
    #[error("session store not found: {path}")]
    StoreNotFound { path: String },

    /// The session key has no entry in the store.
    #[error("session key not found in store: {key}")]
    SessionNotFound { key: String },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClawoverError {
    /// Map error to exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::MissingModels | Self::MissingSessionKey => ExitCode::UsageError,

            Self::NoValidCandidates
            | Self::StoreNotFound { .. }
            | Self::SessionNotFound { .. } => ExitCode::ConfigError,

            Self::NoValidSessionCandidates => ExitCode::CandidateError,

            Self::Io(_) | Self::Json(_) | Self::Http(_) | Self::Other(_) => ExitCode::Internal,
        }
    }
}

/// Result type alias for clawover operations.
pub type Result<T> = std::result::Result<T, ClawoverError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_outcome() {
        let codes = [
            ExitCode::Success,
            ExitCode::Unavailable,
            ExitCode::UsageError,
            ExitCode::ConfigError,
            ExitCode::CandidateError,
            ExitCode::Internal,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(u8::from(*a), u8::from(*b));
            }
        }
    }

    #[test]
    fn missing_input_maps_to_usage_error() {
        assert_eq!(ClawoverError::MissingModels.exit_code(), ExitCode::UsageError);
        assert_eq!(
            ClawoverError::MissingSessionKey.exit_code(),
            ExitCode::UsageError
        );
    }

    #[test]
    fn candidate_and_lookup_errors_keep_original_numbering() {
        assert_eq!(u8::from(ClawoverError::NoValidCandidates.exit_code()), 3);
        assert_eq!(
            u8::from(
                ClawoverError::SessionNotFound {
                    key: "agent:main".to_string()
                }
                .exit_code()
            ),
            3
        );
        assert_eq!(
            u8::from(ClawoverError::NoValidSessionCandidates.exit_code()),
            4
        );
    }

    #[test]
    fn internal_faults_map_to_ten() {
        let err = ClawoverError::Json(serde_json::from_str::<()>("not json").unwrap_err());
        assert_eq!(u8::from(err.exit_code()), 10);

        let err = ClawoverError::Other(anyhow::anyhow!("unexpected"));
        assert_eq!(u8::from(err.exit_code()), 10);
    }

    #[test]
    fn error_messages_name_the_missing_flag() {
        assert!(ClawoverError::MissingModels.to_string().contains("--models"));
        assert!(
            ClawoverError::MissingSessionKey
                .to_string()
                .contains("--session-key")
        );
    }
}

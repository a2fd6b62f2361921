//! Tracing subscriber setup.
//!
//! Level comes from `--log-level`/`--verbose` or `CLAWOVER_LOG`, format from
//! `--json-output` or `CLAWOVER_LOG_FORMAT`, and `CLAWOVER_LOG_FILE`
//! redirects output from stderr to a file. Progress lines stay on stdout;
//! logs never mix with them.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_LEVEL_ENV: &str = "CLAWOVER_LOG";
const LOG_FORMAT_ENV: &str = "CLAWOVER_LOG_FORMAT";
const LOG_FILE_ENV: &str = "CLAWOVER_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs.
    #[default]
    Human,
    /// JSON logs (one event per line).
    Json,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Log level from CLI argument or environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Parse from CLI argument.
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to tracing filter string.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn env_setting(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Initialize logging for the process. Safe to call once from `main`.
pub fn init(level_arg: Option<&str>, json_output: bool, verbose: bool) {
    let level = level_arg
        .and_then(LogLevel::from_arg)
        .or_else(|| {
            env_setting(LOG_LEVEL_ENV)
                .as_deref()
                .and_then(LogLevel::from_arg)
        })
        .unwrap_or_default();
    let level = if verbose && matches!(level, LogLevel::Warn) {
        LogLevel::Debug
    } else {
        level
    };

    let format = if json_output {
        LogFormat::Json
    } else {
        env_setting(LOG_FORMAT_ENV)
            .as_deref()
            .and_then(LogFormat::from_arg)
            .unwrap_or_default()
    };

    let file = env_setting(LOG_FILE_ENV)
        .map(PathBuf::from)
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
    let writer = match file {
        Some(file) => BoxMakeWriter::new(file),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("clawover={}", level.as_filter())));

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(writer)
                .try_init()
                .ok();
        }
        LogFormat::Human => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_target(false)
                .without_time()
                .try_init()
                .ok();
        }
    }
}

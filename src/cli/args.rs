//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::probe::DEFAULT_TIMEOUT_MS;

/// Model failover utility for OpenClaw.
///
/// Probes candidate models in priority order and records the first working
/// one, either as the global default or as a per-session override.
#[derive(Parser, Debug)]
#[command(name = "clawover")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // === Global flags ===
    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSON logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update the global default model to the first available candidate
    DefaultModel(DefaultModelArgs),

    /// Apply or reset a per-session model override
    Session(SessionArgs),
}

/// Arguments for the `default-model` command.
#[derive(Args, Debug)]
pub struct DefaultModelArgs {
    /// Comma-separated provider/model candidates, highest priority first
    #[arg(short, long, value_name = "LIST")]
    pub models: String,

    /// Path to the OpenClaw config (default: ~/.openclaw/openclaw.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Probe timeout in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Directory for config backups (default: alongside the config)
    #[arg(short, long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,
}

/// Arguments for the `session` command.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Session key to update
    #[arg(short = 's', long, value_name = "KEY")]
    pub session_key: String,

    /// Comma-separated provider/model candidates, highest priority first
    #[arg(short, long, value_name = "LIST")]
    pub models: String,

    /// Path to the session store (default: ./sessions.json)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Probe timeout in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Directory for store backups (default: alongside the store)
    #[arg(short, long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,
}

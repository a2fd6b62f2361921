//! Default locations for the OpenClaw config and session store.

use std::path::PathBuf;

/// Default global config path: `~/.openclaw/openclaw.json`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".openclaw")
        .join("openclaw.json")
}

/// Default session store, resolved against the working directory.
#[must_use]
pub fn default_store_path() -> PathBuf {
    PathBuf::from("sessions.json")
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

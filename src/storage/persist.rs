//! Backup-then-write persistence for JSON documents.
//!
//! The write is atomic relative to process crashes: content goes to a temp
//! file in the destination directory, is fsynced, then renamed over the
//! target. The backup taken beforehand is best-effort; a failed backup is
//! logged and the primary write proceeds without one.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::util::time::backup_timestamp;

/// Back up `path` if it exists, then replace it with `document`.
///
/// # Errors
///
/// Returns an error when serialization or the primary write fails. Backup
/// failures are swallowed.
pub fn save(path: &Path, document: &Value, backup_dir: Option<&Path>) -> Result<()> {
    if let Some(dest) = backup(path, backup_dir) {
        println!("Backed up {} -> {}", path.display(), dest.display());
    }
    write_atomic(path, document)
}

/// Copy `path` to `<fileName>.backup-<timestamp>`, alongside the original or
/// in `backup_dir` when given. Returns the backup path, or `None` when the
/// original does not exist or the copy failed.
pub fn backup(path: &Path, backup_dir: Option<&Path>) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }
    let name = path.file_name()?.to_string_lossy().into_owned();
    let dir = backup_dir.map_or_else(|| parent_dir(path).to_path_buf(), Path::to_path_buf);

    if let Err(err) = fs::create_dir_all(&dir) {
        tracing::warn!(dir = %dir.display(), error = %err, "could not create backup directory");
        return None;
    }

    let dest = dir.join(format!("{name}.backup-{}", backup_timestamp(Utc::now())));
    match fs::copy(path, &dest) {
        Ok(_) => Some(dest),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "backup failed, continuing without one"
            );
            None
        }
    }
}

/// Pretty-printed UTF-8 write that cannot leave a truncated document behind.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or the temp file
/// cannot be written, synced, or renamed into place.
pub fn write_atomic(path: &Path, document: &Value) -> Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir)?;
    let content = serde_json::to_string_pretty(document)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_parent_and_pretty_prints() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/config.json");

        write_atomic(&path, &json!({"agents": {"defaults": {}}})).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'), "document should be pretty-printed");
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, json!({"agents": {"defaults": {}}}));
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        write_atomic(&path, &json!({"v": 1})).unwrap();
        write_atomic(&path, &json!({"v": 2})).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, json!({"v": 2}));
    }

    #[test]
    fn backup_is_skipped_when_target_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        assert!(backup(&path, None).is_none());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn backup_lands_next_to_the_original_by_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, "{}").unwrap();

        let dest = backup(&path, None).unwrap();
        assert_eq!(dest.parent().unwrap(), tmp.path());
        let name = dest.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("store.json.backup-"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "{}");
    }

    #[test]
    fn backup_honors_an_explicit_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, "{\"a\":1}").unwrap();
        let backup_dir = tmp.path().join("backups");

        let dest = backup(&path, Some(&backup_dir)).unwrap();
        assert_eq!(dest.parent().unwrap(), backup_dir);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn save_backs_up_before_overwriting() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, "{\"old\":true}").unwrap();

        save(&path, &json!({"new": true}), None).unwrap();

        let entries: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        let backup_name = entries
            .iter()
            .find(|n| n.starts_with("store.json.backup-"))
            .expect("backup file should exist");
        assert_eq!(
            fs::read_to_string(tmp.path().join(backup_name)).unwrap(),
            "{\"old\":true}"
        );
        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, json!({"new": true}));
    }
}

//! The session store and one of its entries as a failover target.
//!
//! The store is a JSON object keyed by session identifier. Only the entry
//! being updated is ever touched; all other entries, their order, and any
//! fields this tool does not know about are preserved on rewrite.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::candidate::ModelRef;
use crate::core::driver::FailoverTarget;
use crate::core::policy::{self, Selection};
use crate::error::{ClawoverError, Result};
use crate::util::time;

/// One session's override record.
///
/// Absent `providerOverride`/`modelOverride` means "use the global default";
/// the two are always both present or both absent. `updatedAt` is the epoch
/// millisecond stamp of the last actual mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_override: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_override: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_profile_override: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_profile_override_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,

    /// Fields owned by other parts of OpenClaw; carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionEntry {
    /// The overriding pair, when both halves are present.
    #[must_use]
    pub fn override_ref(&self) -> Option<ModelRef> {
        match (&self.provider_override, &self.model_override) {
            (Some(provider), Some(model)) => Some(ModelRef::new(provider, model)),
            _ => None,
        }
    }
}

/// Loaded session store document plus its location.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl SessionStore {
    /// Load the store at `path`.
    ///
    /// # Errors
    ///
    /// Unlike the global config, a missing store is a hard error; there is
    /// nothing to override. Also fails when the file is not a JSON object.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClawoverError::StoreNotFound {
                path: path.display().to_string(),
            });
        }
        let raw = fs::read_to_string(path)?;
        let doc: Value = serde_json::from_str(&raw)?;
        let Value::Object(entries) = doc else {
            return Err(ClawoverError::Other(anyhow!(
                "session store root is not a JSON object: {}",
                path.display()
            )));
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Typed view of one entry.
    ///
    /// # Errors
    ///
    /// Fails with `SessionNotFound` when the key has no entry.
    pub fn entry(&self, key: &str) -> Result<SessionEntry> {
        let value = self
            .entries
            .get(key)
            .ok_or_else(|| ClawoverError::SessionNotFound {
                key: key.to_string(),
            })?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Replace one entry, leaving every other key as it was.
    ///
    /// # Errors
    ///
    /// Fails when the entry cannot be serialized.
    pub fn set_entry(&mut self, key: &str, entry: &SessionEntry) -> Result<()> {
        self.entries
            .insert(key.to_string(), serde_json::to_value(entry)?);
        Ok(())
    }

    /// Full store document.
    #[must_use]
    pub fn document(&self) -> Value {
        Value::Object(self.entries.clone())
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One session entry, addressed for failover.
#[derive(Debug, Clone)]
pub struct SessionTarget {
    store: SessionStore,
    key: String,
    entry: SessionEntry,
}

impl SessionTarget {
    /// Load the store and resolve `key` within it.
    ///
    /// # Errors
    ///
    /// Fails when the store is missing or unreadable, or the key is absent.
    pub fn open(store_path: &Path, key: &str) -> Result<Self> {
        let store = SessionStore::load(store_path)?;
        let entry = store.entry(key)?;
        Ok(Self {
            store,
            key: key.to_string(),
            entry,
        })
    }

    /// Current state of the addressed entry.
    #[must_use]
    pub fn entry(&self) -> &SessionEntry {
        &self.entry
    }
}

impl FailoverTarget for SessionTarget {
    fn current_selection(&self) -> Option<ModelRef> {
        self.entry.override_ref()
    }

    fn decide(&mut self, selection: &Selection) -> Result<bool> {
        let (next, changed) = policy::apply_to_entry(&self.entry, selection, time::now_millis());
        if changed {
            self.store.set_entry(&self.key, &next)?;
            self.entry = next;
        }
        Ok(changed)
    }

    fn document(&self) -> Value {
        self.store.document()
    }

    fn path(&self) -> &Path {
        self.store.path()
    }
}

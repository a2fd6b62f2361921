//! The global OpenClaw config document as a failover target.
//!
//! Only `agents.defaults.model.primary` is ever written; everything else in
//! the document, including sibling fallback lists, passes through verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use serde_json::{Map, Value};

use crate::core::candidate::ModelRef;
use crate::core::driver::FailoverTarget;
use crate::core::policy::{self, Selection};
use crate::error::{ClawoverError, Result};

/// Loaded global config document plus its location.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    path: PathBuf,
    doc: Value,
}

impl GlobalConfig {
    /// Load the config at `path`. A missing file starts from an empty
    /// document; a present file must parse as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, is not valid JSON, or
    /// its root is not an object.
    pub fn load(path: &Path) -> Result<Self> {
        let doc = if path.exists() {
            let raw = fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&raw)?;
            if !value.is_object() {
                return Err(ClawoverError::Other(anyhow!(
                    "config root is not a JSON object: {}",
                    path.display()
                )));
            }
            value
        } else {
            tracing::debug!(
                path = %path.display(),
                "config file missing, starting from an empty document"
            );
            Value::Object(Map::new())
        };

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// The recorded `provider/model` string, if any.
    #[must_use]
    pub fn primary_model(&self) -> Option<&str> {
        policy::primary_model(&self.doc)
    }
}

impl FailoverTarget for GlobalConfig {
    fn current_selection(&self) -> Option<ModelRef> {
        self.primary_model().and_then(ModelRef::parse)
    }

    fn decide(&mut self, selection: &Selection) -> Result<bool> {
        match selection {
            Selection::Winner(winner) => {
                let (next, changed) = policy::apply_primary(&self.doc, winner);
                if changed {
                    self.doc = next;
                }
                Ok(changed)
            }
            // The global default is never un-set; a run with every candidate
            // down leaves the document as it was.
            Selection::Default => Ok(false),
        }
    }

    fn document(&self) -> Value {
        self.doc.clone()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

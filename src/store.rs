//! The in-memory preference document and its load/save lifecycle.
//!
//! The document is an owned value with an explicit lifecycle (load, mutate,
//! save, discard) rather than ambient static state. Legacy-store fallback
//! lives one layer up, in [`crate::bridge`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::PrefsError;
use crate::options::StoreOptions;
use crate::paths;
use crate::value::PrefValue;

/// The preference document, loaded from and flushed to a single JSON file.
///
/// After [`save_and_discard`](SettingsStore::save_and_discard) the document
/// and the cached path are cleared; later operations log an access failure
/// and return a not-found/failed answer instead of touching cleared state.
#[derive(Debug)]
pub struct SettingsStore {
    doc: Option<BTreeMap<String, PrefValue>>,
    path: Option<PathBuf>,
    save_on_exit: bool,
}

impl SettingsStore {
    /// Resolves the document path and loads the document. A missing file is
    /// established immediately as an empty JSON object; an existing file
    /// must parse as a JSON object (parse failures propagate, there is no
    /// partial-recovery policy).
    pub fn load(options: &StoreOptions) -> Result<SettingsStore, PrefsError> {
        let directory = options.resolved_directory();
        let path = paths::resolve(&directory, &options.file_name)?;

        let doc = if path.exists() {
            parse_document(&fs::read_to_string(&path)?)?
        } else {
            let doc = BTreeMap::new();
            write_document(&path, &doc)?;
            doc
        };

        Ok(SettingsStore {
            doc: Some(doc),
            path: Some(path),
            save_on_exit: options.save_on_exit,
        })
    }

    /// Whether the document is still available (not yet discarded).
    pub fn is_loaded(&self) -> bool {
        self.doc.is_some()
    }

    /// The resolved document path, cached at load time.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Looks up a key. No legacy fallback happens at this layer.
    pub fn get(&self, key: &str) -> Option<&PrefValue> {
        match self.doc.as_ref() {
            Some(doc) => doc.get(key),
            None => {
                tracing::error!("failed to access the preference document");
                None
            }
        }
    }

    /// Writes a value. A key that already exists with a different kind is
    /// left unchanged and the write reports failure.
    pub fn set(&mut self, key: &str, value: PrefValue) -> bool {
        let Some(doc) = self.doc.as_mut() else {
            tracing::error!("failed to access the preference document");
            return false;
        };
        if let Some(existing) = doc.get(key) {
            if existing.kind() != value.kind() {
                tracing::warn!(
                    "refusing to overwrite {} value at key '{}' with a {} value",
                    existing.kind(),
                    key,
                    value.kind()
                );
                return false;
            }
        }
        doc.insert(key.to_string(), value);
        true
    }

    /// Removes a key; removing an absent key is a no-op.
    pub fn delete(&mut self, key: &str) {
        let Some(doc) = self.doc.as_mut() else {
            tracing::error!("failed to access the preference document");
            return;
        };
        doc.remove(key);
    }

    /// Replaces the document with a fresh empty one. Never fails, even on a
    /// discarded store; the cached path is left as-is.
    pub fn delete_all(&mut self) {
        self.doc = Some(BTreeMap::new());
    }

    /// Serializes the document to the cached path, re-creating the
    /// directory first if it vanished. Failures are logged and swallowed;
    /// the in-memory document is unaffected either way.
    pub fn save(&self) {
        let (Some(doc), Some(path)) = (self.doc.as_ref(), self.path.as_ref()) else {
            tracing::error!("failed to access the preference document");
            return;
        };
        if let Err(err) = write_document(path, doc) {
            tracing::error!(
                "failed to write the preference document at '{}': {}",
                path.display(),
                err
            );
        }
    }

    /// [`save`](SettingsStore::save) followed by clearing the document and
    /// the cached path. Used by the drop flush.
    pub fn save_and_discard(&mut self) {
        self.save();
        self.doc = None;
        self.path = None;
    }
}

impl Drop for SettingsStore {
    // One-shot quit flush. Must never block or panic on the way out.
    fn drop(&mut self) {
        if self.save_on_exit && self.doc.is_some() {
            self.save_and_discard();
        }
    }
}

fn parse_document(text: &str) -> Result<BTreeMap<String, PrefValue>, PrefsError> {
    let raw: JsonMap<String, JsonValue> = serde_json::from_str(text)?;
    let mut doc = BTreeMap::new();
    for (key, value) in raw {
        match PrefValue::from_json(&value) {
            Some(parsed) => {
                doc.insert(key, parsed);
            }
            None => {
                tracing::warn!("skipping non-scalar value at key '{}'", key);
            }
        }
    }
    Ok(doc)
}

fn write_document(path: &Path, doc: &BTreeMap<String, PrefValue>) -> Result<(), PrefsError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut raw = JsonMap::new();
    for (key, value) in doc {
        raw.insert(key.clone(), value.to_json());
    }
    let text = serde_json::to_string_pretty(&JsonValue::Object(raw))?;
    fs::write(path, text)?;
    Ok(())
}

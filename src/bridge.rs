//! The public façade: typed reads with legacy fallback and migration.
//!
//! Every read consults the JSON document first. On a miss the legacy store
//! is probed with a type sentinel (maximum representable number, or the
//! empty string); a hit is migrated into the document and deleted from the
//! legacy store. A legacy value that genuinely equals its sentinel is
//! indistinguishable from an absent one; this is a documented limitation
//! of the probe scheme.

use crate::legacy::LegacyStore;
use crate::store::SettingsStore;
use crate::value::PrefValue;

const FLOAT_ABSENT: f64 = f64::MAX;
const INT_ABSENT: i64 = i64::MAX;

/// Per-call fallback behavior. The default consults the legacy store on a
/// miss and migrates anything it finds into the JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    /// Probe the legacy store when the JSON document misses.
    pub consult_legacy: bool,
    /// Copy a legacy hit into the JSON document and delete the original.
    pub migrate: bool,
}

impl Default for Fallback {
    fn default() -> Self {
        Self {
            consult_legacy: true,
            migrate: true,
        }
    }
}

impl Fallback {
    /// Answers from the JSON document only.
    pub fn local_only() -> Self {
        Self {
            consult_legacy: false,
            migrate: false,
        }
    }
}

/// Preference access with transparent fallback to the platform's legacy
/// registry. All failures are recovered into safe defaults; the only
/// fallible call in the lifecycle is [`SettingsStore::load`].
#[derive(Debug)]
pub struct PrefsBridge<L: LegacyStore> {
    store: SettingsStore,
    legacy: L,
}

impl<L: LegacyStore> PrefsBridge<L> {
    pub fn new(store: SettingsStore, legacy: L) -> Self {
        Self { store, legacy }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn legacy(&self) -> &L {
        &self.legacy
    }

    /// Retrieves the float at `key`. A stored value of another kind counts
    /// as a miss; a miss falls back per `fallback`, and `default` is
    /// returned when the key is found nowhere.
    pub fn get_float(&mut self, key: &str, default: f64, fallback: Fallback) -> f64 {
        if !self.store.is_loaded() {
            tracing::error!("failed to access the preference document; returning {}", default);
            return default;
        }
        if let Some(PrefValue::Float(v)) = self.store.get(key) {
            return *v;
        }
        if fallback.consult_legacy {
            let found = self.legacy.get_float(key, FLOAT_ABSENT);
            if found != FLOAT_ABSENT {
                if fallback.migrate {
                    self.store.set(key, PrefValue::Float(found));
                    self.legacy.delete_key(key);
                }
                return found;
            }
        }
        tracing::warn!("no float value at key '{}'; returning {}", key, default);
        default
    }

    /// Retrieves the int at `key`. Same miss/fallback semantics as
    /// [`get_float`](PrefsBridge::get_float).
    pub fn get_int(&mut self, key: &str, default: i64, fallback: Fallback) -> i64 {
        if !self.store.is_loaded() {
            tracing::error!("failed to access the preference document; returning {}", default);
            return default;
        }
        if let Some(PrefValue::Int(v)) = self.store.get(key) {
            return *v;
        }
        if fallback.consult_legacy {
            let found = self.legacy.get_int(key, INT_ABSENT);
            if found != INT_ABSENT {
                if fallback.migrate {
                    self.store.set(key, PrefValue::Int(found));
                    self.legacy.delete_key(key);
                }
                return found;
            }
        }
        tracing::warn!("no int value at key '{}'; returning {}", key, default);
        default
    }

    /// Retrieves the string at `key`. A stored string that is present but
    /// empty is returned with a warning.
    pub fn get_string(&mut self, key: &str, default: &str, fallback: Fallback) -> String {
        if !self.store.is_loaded() {
            tracing::error!(
                "failed to access the preference document; returning '{}'",
                default
            );
            return default.to_string();
        }
        if let Some(PrefValue::Str(v)) = self.store.get(key) {
            if v.is_empty() {
                tracing::warn!("string value at key '{}' is empty", key);
            }
            return v.clone();
        }
        if fallback.consult_legacy {
            let found = self.legacy.get_string(key, "");
            if !found.is_empty() {
                if fallback.migrate {
                    self.store.set(key, PrefValue::Str(found.clone()));
                    self.legacy.delete_key(key);
                }
                return found;
            }
        }
        tracing::warn!("no string value at key '{}'; returning '{}'", key, default);
        default.to_string()
    }

    pub fn set_float(&mut self, key: &str, value: f64) -> bool {
        if !value.is_finite() {
            // Non-finite floats have no JSON representation.
            tracing::warn!("refusing non-finite float {} at key '{}'", value, key);
            return false;
        }
        self.store.set(key, PrefValue::Float(value))
    }

    pub fn set_int(&mut self, key: &str, value: i64) -> bool {
        self.store.set(key, PrefValue::Int(value))
    }

    pub fn set_string(&mut self, key: &str, value: &str) -> bool {
        self.store.set(key, PrefValue::Str(value.to_string()))
    }

    /// Key existence. A legacy hit with `migrate` set copies the value into
    /// the document and deletes the legacy entry; the legacy existence
    /// answer is returned either way.
    pub fn has_key(&mut self, key: &str, fallback: Fallback) -> bool {
        if !self.store.is_loaded() {
            tracing::error!("failed to access the preference document");
            return false;
        }
        if self.store.get(key).is_some() {
            return true;
        }
        if !fallback.consult_legacy {
            return false;
        }
        let exists = self.legacy.has_key(key);
        if exists && fallback.migrate {
            self.migrate_untyped(key);
            self.legacy.delete_key(key);
        }
        exists
    }

    // Probe order is float, then int, then string; first match wins. The
    // order is load-bearing for which kind an ambiguous value is tagged
    // with and must stay stable across releases.
    fn migrate_untyped(&mut self, key: &str) {
        let float_value = self.legacy.get_float(key, FLOAT_ABSENT);
        if float_value != FLOAT_ABSENT {
            self.store.set(key, PrefValue::Float(float_value));
            return;
        }
        let int_value = self.legacy.get_int(key, INT_ABSENT);
        if int_value != INT_ABSENT {
            self.store.set(key, PrefValue::Int(int_value));
            return;
        }
        let string_value = self.legacy.get_string(key, "");
        if !string_value.is_empty() {
            self.store.set(key, PrefValue::Str(string_value));
        }
    }

    /// Removes a key from the document and, when `also_delete_legacy` is
    /// set, from the legacy store. Absence in either store is not an error.
    pub fn delete_key(&mut self, key: &str, also_delete_legacy: bool) {
        if !self.store.is_loaded() {
            tracing::error!("failed to access the preference document");
            return;
        }
        if also_delete_legacy {
            self.legacy.delete_key(key);
        }
        self.store.delete(key);
    }

    /// Clears the document and, when `also_delete_legacy` is set, the
    /// entire legacy store.
    pub fn delete_all(&mut self, also_delete_legacy: bool) {
        if also_delete_legacy {
            self.legacy.delete_all();
        }
        self.store.delete_all();
    }

    /// Flushes the document to disk (best effort).
    pub fn save(&self) {
        self.store.save();
    }
}

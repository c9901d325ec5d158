//! Contract for the platform preference registry being replaced.

use std::collections::HashMap;

use crate::value::PrefValue;

/// The platform's built-in key-value settings mechanism. Implementations
/// are supplied by the host; the bridge only ever speaks this contract, so
/// the registry can be faked in tests and swapped per platform.
///
/// `has_key` is assumed reliable (no sentinel); the typed getters return
/// the supplied default when the key is absent or holds another type.
pub trait LegacyStore {
    fn get_float(&self, key: &str, default: f64) -> f64;
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn get_string(&self, key: &str, default: &str) -> String;
    fn has_key(&self, key: &str) -> bool;
    fn delete_key(&mut self, key: &str);
    fn delete_all(&mut self);
}

/// In-memory [`LegacyStore`], used as a test double and as a stand-in on
/// platforms without a native registry.
#[derive(Debug, Default)]
pub struct MemoryLegacyStore {
    entries: HashMap<String, PrefValue>,
}

impl MemoryLegacyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_float(&mut self, key: &str, value: f64) {
        self.entries.insert(key.to_string(), PrefValue::Float(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), PrefValue::Int(value));
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), PrefValue::Str(value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LegacyStore for MemoryLegacyStore {
    fn get_float(&self, key: &str, default: f64) -> f64 {
        match self.entries.get(key) {
            Some(PrefValue::Float(v)) => *v,
            _ => default,
        }
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.entries.get(key) {
            Some(PrefValue::Int(v)) => *v,
            _ => default,
        }
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.entries.get(key) {
            Some(PrefValue::Str(v)) => v.clone(),
            _ => default.to_string(),
        }
    }

    fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn delete_key(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn delete_all(&mut self) {
        self.entries.clear();
    }
}

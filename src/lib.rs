//! prefstore: JSON-file preferences with legacy-registry fallback.
//!
//! A drop-in replacement for a platform's built-in key-value settings
//! store. Simple typed values (float, int, string) live in a single
//! human-readable JSON document on disk instead of an opaque registry;
//! reads fall back to the legacy store and migrate what they find, so a
//! shipped application transitions one key at a time.
//!
//! # Architecture
//!
//! - [`paths`]: resolves and validates the on-disk document location
//! - [`store`]: the in-memory document with an explicit load/save lifecycle
//! - [`bridge`]: the read/write façade with fallback and migration
//! - [`legacy`]: the contract the platform registry is accessed through
//!
//! The document is one top-level JSON object of plain scalars, no envelope.
//! Once a key exists with a given kind, writes of another kind are rejected.
//! Failures past load time are recovered into safe defaults and logged via
//! the `tracing` facade; nothing panics on the hot path.
//!
//! # Example
//!
//! ```no_run
//! use prefstore::{Fallback, MemoryLegacyStore, PrefsBridge, SettingsStore, StoreOptions};
//!
//! # fn main() -> Result<(), prefstore::PrefsError> {
//! let options = StoreOptions::default();
//! let store = SettingsStore::load(&options)?;
//! let mut prefs = PrefsBridge::new(store, MemoryLegacyStore::new());
//!
//! prefs.set_float("volume", 0.8);
//! let volume = prefs.get_float("volume", 1.0, Fallback::default());
//! prefs.save();
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod error;
pub mod legacy;
pub mod options;
pub mod paths;
pub mod store;
pub mod value;

pub use bridge::{Fallback, PrefsBridge};
pub use error::PrefsError;
pub use legacy::{LegacyStore, MemoryLegacyStore};
pub use options::StoreOptions;
pub use store::SettingsStore;
pub use value::{PrefKind, PrefValue};

//! Store configuration: four knobs with fixed defaults and an optional
//! JSON override file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the preference store, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Prefix `directory_path` with the platform app-data directory.
    pub use_app_data_dir: bool,
    /// Directory holding the preference document.
    pub directory_path: String,
    /// Document file name; must end in `.json`.
    pub file_name: String,
    /// Flush the document to disk when the store is dropped.
    pub save_on_exit: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            use_app_data_dir: true,
            directory_path: "Saves/Prefs".to_string(),
            file_name: "Prefs.json".to_string(),
            save_on_exit: true,
        }
    }
}

impl StoreOptions {
    /// Reads overrides from a JSON file. A missing, unreadable, or invalid
    /// file falls back to the defaults, as do empty path components.
    pub fn load_or_default(path: &Path) -> StoreOptions {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return StoreOptions::default(),
            Err(err) => {
                tracing::warn!(
                    "unable to read options from '{}': {}; using default settings",
                    path.display(),
                    err
                );
                return StoreOptions::default();
            }
        };
        match serde_json::from_str::<StoreOptions>(&text) {
            Ok(options) => {
                if options.directory_path.is_empty() || options.file_name.is_empty() {
                    tracing::warn!(
                        "options file '{}' has empty path components; using default settings",
                        path.display()
                    );
                    return StoreOptions::default();
                }
                options
            }
            Err(err) => {
                tracing::warn!(
                    "unable to read options from '{}': {}; using default settings",
                    path.display(),
                    err
                );
                StoreOptions::default()
            }
        }
    }

    /// The directory the document lives in, with the platform app-data
    /// directory prefixed when `use_app_data_dir` is set.
    pub fn resolved_directory(&self) -> String {
        if !self.use_app_data_dir {
            return self.directory_path.clone();
        }
        match dirs::data_dir() {
            Some(base) => base
                .join(&self.directory_path)
                .to_string_lossy()
                .into_owned(),
            None => {
                tracing::warn!(
                    "no platform app-data directory; using '{}' as-is",
                    self.directory_path
                );
                self.directory_path.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = StoreOptions::default();
        assert!(options.use_app_data_dir);
        assert_eq!(options.directory_path, "Saves/Prefs");
        assert_eq!(options.file_name, "Prefs.json");
        assert!(options.save_on_exit);
    }

    #[test]
    fn test_missing_options_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let options = StoreOptions::load_or_default(&tmp.path().join("absent.json"));
        assert_eq!(options.directory_path, "Saves/Prefs");
    }

    #[test]
    fn test_invalid_options_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("options.json");
        fs::write(&path, "not json at all").expect("write");
        let options = StoreOptions::load_or_default(&path);
        assert_eq!(options.file_name, "Prefs.json");
    }

    #[test]
    fn test_empty_components_fall_back_to_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("options.json");
        fs::write(&path, r#"{"directory_path": "", "file_name": "Prefs.json"}"#).expect("write");
        let options = StoreOptions::load_or_default(&path);
        assert_eq!(options.directory_path, "Saves/Prefs");
    }

    #[test]
    fn test_partial_overrides_keep_remaining_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("options.json");
        fs::write(&path, r#"{"file_name": "Game.json", "save_on_exit": false}"#).expect("write");
        let options = StoreOptions::load_or_default(&path);
        assert_eq!(options.file_name, "Game.json");
        assert!(!options.save_on_exit);
        assert_eq!(options.directory_path, "Saves/Prefs");
        assert!(options.use_app_data_dir);
    }

    #[test]
    fn test_resolved_directory_without_app_data_prefix() {
        let options = StoreOptions {
            use_app_data_dir: false,
            directory_path: "some/dir".to_string(),
            ..StoreOptions::default()
        };
        assert_eq!(options.resolved_directory(), "some/dir");
    }
}

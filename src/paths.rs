//! Resolution and validation of the on-disk document location.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::PrefsError;

/// Characters rejected in directory and file-name components, mirroring
/// filesystem naming restrictions. Path separators are checked separately
/// so they stay legal inside the directory component.
const FORBIDDEN_CHARS: &str = r#"[<>:"|?*]"#;

/// Validates a single path component. Rejects whitespace-only input and any
/// forbidden character; with `is_file_name` set, path separators are
/// rejected as well.
pub fn validate_component(name: &str, is_file_name: bool) -> bool {
    if name.trim().is_empty() {
        return false;
    }
    if is_file_name && (name.contains('/') || name.contains('\\')) {
        return false;
    }
    let forbidden = Regex::new(FORBIDDEN_CHARS).expect("static regex");
    !forbidden.is_match(name)
}

/// Validates that a file name carries the literal `.json` suffix
/// (case-sensitive match on the last five characters).
pub fn validate_json_file_name(file_name: &str) -> bool {
    file_name.len() > ".json".len() && file_name.ends_with(".json")
}

/// Computes the document path from a directory and a file name, creating
/// the directory (and parents) when missing. Components are validated
/// before anything touches the disk.
pub fn resolve(directory: &str, file_name: &str) -> Result<PathBuf, PrefsError> {
    if !validate_component(directory, false) {
        return Err(PrefsError::PathError(format!(
            "invalid directory '{}'",
            directory
        )));
    }
    if !validate_component(file_name, true) {
        return Err(PrefsError::PathError(format!(
            "invalid file name '{}'",
            file_name
        )));
    }
    if !validate_json_file_name(file_name) {
        return Err(PrefsError::PathError(format!(
            "file name '{}' does not end in .json",
            file_name
        )));
    }

    let dir = Path::new(directory);
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_component_allows_separators() {
        assert!(validate_component("a/b", false));
        assert!(validate_component("Saves/Prefs", false));
    }

    #[test]
    fn test_file_name_component_rejects_separators() {
        assert!(!validate_component("sub/prefs.json", true));
        assert!(!validate_component("sub\\prefs.json", true));
        assert!(validate_component("prefs.json", true));
    }

    #[test]
    fn test_forbidden_characters_are_rejected() {
        for name in ["a<b", "a>b", "a:b", "a\"b", "a|b", "a?b", "a*b"] {
            assert!(!validate_component(name, false), "accepted '{}'", name);
        }
    }

    #[test]
    fn test_whitespace_only_is_rejected() {
        assert!(!validate_component("", false));
        assert!(!validate_component("   ", false));
        assert!(!validate_component("\t", true));
    }

    #[test]
    fn test_json_suffix_is_exact_and_case_sensitive() {
        assert!(validate_json_file_name("prefs.json"));
        assert!(!validate_json_file_name("prefs"));
        assert!(!validate_json_file_name("prefs.JSON"));
        assert!(!validate_json_file_name(".json"));
        assert!(validate_json_file_name("a.json"));
    }
}

//! Idempotent text patching.
//!
//! The downloaded handler files carry a small hard-coded icon set that must
//! be widened to cover every format the client can receive. Patching is a
//! pure transform over the full file content: each rule replaces a fixed
//! pre-patch literal, and the replacement never matches any rule's pattern,
//! so re-applying the transform to already-patched output is a no-op by
//! construction.

use crate::error::Result;
use std::path::Path;

/// A single pattern → replacement rewrite rule.
#[derive(Debug, Clone)]
pub struct PatchRule {
    /// Literal pre-patch text to search for.
    pub pattern: String,
    /// Text to substitute for every occurrence of the pattern.
    pub replacement: String,
}

impl PatchRule {
    /// Create a rule from literal pattern and replacement text.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Apply rewrite rules to text, in order.
///
/// Returns the transformed text and whether any rule matched.
pub fn apply_rules(content: &str, rules: &[PatchRule]) -> (String, bool) {
    let mut text = content.to_string();
    let mut modified = false;

    for rule in rules {
        if text.contains(&rule.pattern) {
            text = text.replace(&rule.pattern, &rule.replacement);
            modified = true;
        }
    }

    (text, modified)
}

/// Apply rewrite rules to a file on disk.
///
/// The file is rewritten only when a rule matched; returns whether it was.
/// A missing file is skipped rather than treated as an error, because a
/// handler that was never downloaded has nothing to patch.
pub fn patch_file(path: &Path, rules: &[PatchRule]) -> Result<bool> {
    if !path.is_file() {
        tracing::debug!("skipping patch of missing file {}", path.display());
        return Ok(false);
    }

    let content = std::fs::read_to_string(path)?;
    let (patched, modified) = apply_rules(&content, rules);

    if modified {
        std::fs::write(path, patched)?;
    }

    Ok(modified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon_rules() -> Vec<PatchRule> {
        vec![
            PatchRule::new("icons = {'cd'}", "icons = {'cd', 'flac', 'mp3'}"),
            PatchRule::new("icons = {'cd', 'fm'}", "icons = {'cd', 'flac', 'mp3'}"),
        ]
    }

    #[test]
    fn apply_rules_replaces_matching_pattern() {
        let (out, modified) = apply_rules("x = 1\nicons = {'cd'}\n", &icon_rules());
        assert!(modified);
        assert!(out.contains("icons = {'cd', 'flac', 'mp3'}"));
        assert!(!out.contains("icons = {'cd'}\n"));
    }

    #[test]
    fn apply_rules_is_noop_without_match() {
        let input = "unrelated content\n";
        let (out, modified) = apply_rules(input, &icon_rules());
        assert!(!modified);
        assert_eq!(out, input);
    }

    #[test]
    fn apply_rules_is_idempotent() {
        let input = "icons = {'cd'}\nicons = {'cd', 'fm'}\n";
        let rules = icon_rules();

        let (once, first) = apply_rules(input, &rules);
        let (twice, second) = apply_rules(&once, &rules);

        assert!(first);
        assert!(!second);
        assert_eq!(once, twice);
    }

    #[test]
    fn patch_file_rewrites_on_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("handler.py");
        std::fs::write(&path, "icons = {'cd'}\n").unwrap();

        let modified = patch_file(&path, &icon_rules()).unwrap();

        assert!(modified);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("'flac'"));
    }

    #[test]
    fn patch_file_second_pass_is_noop() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("handler.py");
        std::fs::write(&path, "icons = {'cd'}\n").unwrap();

        assert!(patch_file(&path, &icon_rules()).unwrap());
        let after_first = std::fs::read_to_string(&path).unwrap();

        assert!(!patch_file(&path, &icon_rules()).unwrap());
        let after_second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(after_first, after_second);
    }

    #[test]
    fn patch_file_skips_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("absent.py");
        assert!(!patch_file(&path, &icon_rules()).unwrap());
    }
}

use std::fs;
use std::path::Path;

use log::warn;

// @module: Skip-text resource loading

/// Literal text that must never be sent for translation
///
/// Loaded once per batch run and threaded through the translation gateway;
/// read-only after load. The empty string is a valid no-op rule.
#[derive(Debug, Clone, Default)]
pub struct SkipText(String);

impl SkipText {
    pub fn new(text: impl Into<String>) -> Self {
        SkipText(text.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // @checks: Case-insensitive whole-string match against the skip rule
    pub fn matches(&self, text: &str) -> bool {
        !self.0.is_empty() && text.to_lowercase() == self.0.to_lowercase()
    }
}

/// Loader for the skip-text resource
pub struct SkipTextStore;

impl SkipTextStore {
    /// Read the skip text from a file, soft-failing to the empty rule
    ///
    /// The full file contents, trailing whitespace included, form the
    /// comparison key. An absent or unreadable file is the one I/O failure
    /// that is deliberately non-fatal: it resolves to "nothing is skipped"
    /// and batch processing continues.
    pub fn load<P: AsRef<Path>>(path: P) -> SkipText {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => SkipText::new(text),
            Err(e) => {
                warn!("Could not read skip file {:?}: {}", path, e);
                SkipText::default()
            }
        }
    }
}

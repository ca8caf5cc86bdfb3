/*!
 * Tests for skip-text loading and matching
 */

use std::io::Write;

use pptx_translator::skip_text::{SkipText, SkipTextStore};

/// Test case-insensitive whole-string matching
#[test]
fn test_matches_withDifferentCasing_shouldMatch() {
    let skip = SkipText::new("Lorem Ipsum");
    assert!(skip.matches("Lorem Ipsum"));
    assert!(skip.matches("lorem ipsum"));
    assert!(skip.matches("LOREM IPSUM"));
    assert!(!skip.matches("Lorem"));
    assert!(!skip.matches("Lorem Ipsum dolor"));
    assert!(!skip.matches(""));
}

/// Test that the empty rule skips nothing
#[test]
fn test_matches_withEmptyRule_shouldMatchNothing() {
    let skip = SkipText::default();
    assert!(skip.is_empty());
    assert!(!skip.matches("anything"));
    assert!(!skip.matches(" "));
}

/// Test that trailing whitespace is part of the comparison key
#[test]
fn test_matches_withTrailingNewline_shouldCompareExactly() {
    let skip = SkipText::new("placeholder\n");
    assert!(skip.matches("PLACEHOLDER\n"));
    assert!(!skip.matches("placeholder"));
}

/// Test loading from a file keeps the full contents
#[test]
fn test_load_withExistingFile_shouldKeepContents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skip.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "Sample Text\n").unwrap();

    let skip = SkipTextStore::load(&path);
    assert_eq!(skip.as_str(), "Sample Text\n");
    assert!(skip.matches("sample text\n"));
}

/// Test the soft-fail path for a missing resource
#[test]
fn test_load_withMissingFile_shouldFallBackToEmpty() {
    let dir = tempfile::tempdir().unwrap();
    let skip = SkipTextStore::load(dir.path().join("no-such-file.txt"));
    assert!(skip.is_empty());
    assert!(!skip.matches("anything"));
}

/*!
 * Tests for configuration loading, defaults and validation
 */

use std::io::Write;
use std::path::PathBuf;

use pptx_translator::app_config::{Config, LogLevel};

/// Test the built-in defaults
#[test]
fn test_default_shouldMatchDocumentedDefaults() {
    let config = Config::default();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.dest_language, "es");
    assert_eq!(config.input_dir, PathBuf::from("workspace"));
    assert_eq!(config.output_dir(), PathBuf::from("workspace/output"));
    assert_eq!(config.skip_path(), PathBuf::from("workspace/skip.txt"));
    assert_eq!(config.terminology_name, "pptx-translator-terminology");
    assert!(config.terminology_file.is_none());
    assert_eq!(config.reflow.shrink_step_pt, 3.0);
    assert_eq!(config.reflow.min_translate_size_pt, 13.0);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test loading a partial config file with serde defaults filling the rest
#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
            "source_language": "en",
            "dest_language": "fr",
            "input_dir": "decks",
            "reflow": {{ "shrink_step_pt": 2.0 }}
        }}"#
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.dest_language, "fr");
    assert_eq!(config.input_dir, PathBuf::from("decks"));
    assert_eq!(config.output_dir(), PathBuf::from("decks/output"));
    assert_eq!(config.reflow.shrink_step_pt, 2.0);
    // Unset fields keep their defaults
    assert_eq!(config.reflow.min_translate_size_pt, 13.0);
    assert_eq!(config.skip_file, "skip.txt");
}

/// Test the fallback when no config file exists
#[test]
fn test_from_file_or_default_withMissingFile_shouldUseDefaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_file_or_default(dir.path().join("conf.json")).unwrap();
    assert_eq!(config.source_language, "en");
}

/// Test the failure for malformed JSON
#[test]
fn test_from_file_withMalformedJson_shouldFail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Config::from_file(&path).is_err());
}

/// Test validation of the language pair and thresholds
#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.dest_language = "xx".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.dest_language = "fa".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.source_language = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.reflow.shrink_step_pt = -1.0;
    assert!(config.validate().is_err());
}

/// Test an explicit output directory wins over the derived one
#[test]
fn test_output_dir_withExplicitValue_shouldWin() {
    let mut config = Config::default();
    config.output_dir = Some(PathBuf::from("elsewhere"));
    assert_eq!(config.output_dir(), PathBuf::from("elsewhere"));
}

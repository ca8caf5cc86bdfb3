use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::language_id::LanguageId;
use crate::translation::reflow::ReflowSettings;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and merging configuration settings with CLI overrides.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code understood by the translation backend
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Destination language code understood by the translation backend
    #[serde(default = "default_dest_language")]
    pub dest_language: String,

    /// Directory scanned (non-recursively) for .pptx files
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory translated decks are written to; defaults to `{input_dir}/output`
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Name of the skip-text file inside the input directory
    #[serde(default = "default_skip_file")]
    pub skip_file: String,

    /// Path of a terminology CSV file to import before translating
    #[serde(default)]
    pub terminology_file: Option<PathBuf>,

    /// Name the terminology is stored under at the backend
    #[serde(default = "default_terminology_name")]
    pub terminology_name: String,

    /// Reflow tuning
    #[serde(default)]
    pub reflow: ReflowConfig,

    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Font-size heuristics for the reflow pass
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct ReflowConfig {
    /// How far font sizes step down to make room for translated text
    #[serde(default = "default_shrink_step_pt")]
    pub shrink_step_pt: f32,

    /// Text at or below this size after shrinking is left untranslated
    #[serde(default = "default_min_translate_size_pt")]
    pub min_translate_size_pt: f32,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        ReflowConfig {
            shrink_step_pt: default_shrink_step_pt(),
            min_translate_size_pt: default_min_translate_size_pt(),
        }
    }
}

impl From<ReflowConfig> for ReflowSettings {
    fn from(config: ReflowConfig) -> Self {
        ReflowSettings {
            shrink_step: crate::document::Pt::new(config.shrink_step_pt),
            min_translate_size: crate::document::Pt::new(config.min_translate_size_pt),
        }
    }
}

/// Translation backend connection settings
///
/// Credentials are never part of the configuration file; they are read from
/// the standard AWS environment variables when the client is built.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BackendConfig {
    /// Service region; falls back to AWS_REGION / AWS_DEFAULT_REGION
    #[serde(default)]
    pub region: Option<String>,

    /// Service origin override, mainly for tests against a local endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            dest_language: default_dest_language(),
            input_dir: default_input_dir(),
            output_dir: None,
            skip_file: default_skip_file(),
            terminology_file: None,
            terminology_name: default_terminology_name(),
            reflow: ReflowConfig::default(),
            backend: BackendConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load configuration from a JSON file, or fall back to defaults
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Effective output directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join("output"))
    }

    /// Location of the skip-text resource
    pub fn skip_path(&self) -> PathBuf {
        self.input_dir.join(&self.skip_file)
    }

    /// Validate the configuration before a run
    ///
    /// The destination code is checked against the language registry here so
    /// an unsupported pair fails before any document is opened.
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language is not set"));
        }
        if self.dest_language.trim().is_empty() {
            return Err(anyhow!("Destination language is not set"));
        }
        LanguageId::resolve(&self.dest_language)
            .map_err(|e| anyhow!("Destination language is not usable: {}", e))?;
        if self.reflow.shrink_step_pt < 0.0 {
            return Err(anyhow!("Shrink step must not be negative"));
        }
        if self.reflow.min_translate_size_pt < 0.0 {
            return Err(anyhow!("Minimum translate size must not be negative"));
        }
        Ok(())
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_dest_language() -> String {
    "es".to_string()
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("workspace")
}

fn default_skip_file() -> String {
    "skip.txt".to_string()
}

fn default_terminology_name() -> String {
    "pptx-translator-terminology".to_string()
}

fn default_shrink_step_pt() -> f32 {
    3.0
}

fn default_min_translate_size_pt() -> f32 {
    13.0
}

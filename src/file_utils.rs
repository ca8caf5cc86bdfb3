use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find .pptx files directly inside a directory
    ///
    /// Deliberately non-recursive so decks already written to the output
    /// subdirectory are never picked up again. Office lock files (`~$...`)
    /// are ignored. Results are sorted for a stable processing order.
    pub fn find_pptx_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.starts_with("~$") {
                continue;
            }
            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case("pptx") {
                    result.push(path.to_path_buf());
                }
            }
        }

        result.sort();
        Ok(result)
    }

    // @generates: Output file name for a translated deck
    // @params: source_language, dest_language, input_file
    pub fn output_file_name(
        source_language: &str,
        dest_language: &str,
        input_file: &Path,
    ) -> String {
        let original = input_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        format!(
            "{}-{}-{}{}",
            source_language,
            dest_language,
            Local::now().format("%m-%d-"),
            original
        )
    }

    // @generates: Output path for a translated deck
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        source_language: &str,
        dest_language: &str,
    ) -> PathBuf {
        output_dir.as_ref().join(Self::output_file_name(
            source_language,
            dest_language,
            input_file.as_ref(),
        ))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file to raw bytes
    pub fn read_to_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }
}

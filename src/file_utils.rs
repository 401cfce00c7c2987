use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::document;

// @module: File utilities for uploads and the summary download

/// File name offered for the downloaded summary
pub const SUMMARY_FILE_NAME: &str = "summary.txt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Extract the text of an uploaded `.txt`, `.pdf` or `.docx`
    pub fn read_upload<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", path));
        }
        document::extract_file(path).with_context(|| format!("Failed to extract text from: {:?}", path))
    }

    /// Read all of standard input as UTF-8
    pub fn read_stdin() -> Result<String> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        Ok(text)
    }

    // @resolves: A directory target becomes `<dir>/summary.txt`
    pub fn summary_output_path<P: AsRef<Path>>(target: P) -> PathBuf {
        let target = target.as_ref();
        if target.is_dir() {
            target.join(SUMMARY_FILE_NAME)
        } else {
            target.to_path_buf()
        }
    }

    /// Write the final summary as plain text, returning the path written
    pub fn write_summary<P: AsRef<Path>>(target: P, summary: &str) -> Result<PathBuf> {
        let path = Self::summary_output_path(target);
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, summary).with_context(|| format!("Failed to write summary to: {:?}", path))?;
        Ok(path)
    }
}

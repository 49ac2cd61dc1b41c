//! Filesystem adapter
//!
//! Thin I/O layer between the pure pipeline and a directory of bundle
//! files. Enumeration is sorted by file name so a run over an unchanged
//! directory is deterministic. A file that cannot be read or parsed is
//! logged and skipped; one bad export must not abort the batch.

use crate::core::pipeline::PipelineRun;
use crate::domain::{EdsanError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of scanning one input directory.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// JSON files found in the directory
    pub files_found: usize,
    /// Files successfully read and handed to the pipeline
    pub files_read: usize,
    /// Files skipped because of read or parse failures
    pub files_skipped: usize,
}

/// Lists the bundle files (`*.json`) of a directory in stable name order.
///
/// # Errors
///
/// Fails when the directory does not exist or cannot be listed; an input
/// directory that is missing outright is an operator error, unlike a bad
/// file inside it.
pub fn list_bundle_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| {
        EdsanError::Configuration(format!(
            "Cannot read input directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Reads and parses one bundle file.
pub fn read_bundle(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| EdsanError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents).map_err(|e| {
        EdsanError::Serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

/// Feeds every bundle file of a directory into a pipeline run.
///
/// Unreadable or malformed files are logged at warn level and skipped.
pub fn process_directory(run: &mut PipelineRun, dir: impl AsRef<Path>) -> Result<ScanStats> {
    let files = list_bundle_files(&dir)?;
    let mut stats = ScanStats {
        files_found: files.len(),
        ..ScanStats::default()
    };
    tracing::info!(
        dir = %dir.as_ref().display(),
        files = stats.files_found,
        "Scanning input directory"
    );

    for path in files {
        match read_bundle(&path) {
            Ok(bundle) => {
                run.process_bundle(&bundle);
                stats.files_read += 1;
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable file");
                stats.files_skipped += 1;
            }
        }
    }

    Ok(stats)
}

//! Utility functions for error handling
//!
//! Filesystem helpers that attach the path and the purpose of the access to
//! every failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{DisclosureError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(DisclosureError::io(
            format!("File not found, needed for: {purpose}"),
            path,
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    if !path.is_file() {
        return Err(DisclosureError::InvalidPath {
            path: path.to_path_buf(),
            message: format!("expected a file for: {purpose}"),
        });
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
            _ => format!("Failed to open file for: {purpose}"),
        };
        DisclosureError::io(context, path, e)
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(DisclosureError::io(
            format!("Directory not found, needed for: {purpose}"),
            path,
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    if !path.is_dir() {
        return Err(DisclosureError::InvalidPath {
            path: path.to_path_buf(),
            message: format!("expected a directory for: {purpose}"),
        });
    }

    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| DisclosureError::io(format!("Failed to access directory for: {purpose}"), path, e))
}

/// List the regular files directly inside `dir`, sorted by file name
///
/// Only entries for which `keep` returns true are included.
pub fn list_files_sorted<F>(dir: &Path, purpose: &str, keep: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    validate_directory(dir, purpose)?;

    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .map_err(|e| DisclosureError::io(format!("Failed to read directory for: {purpose}"), dir, e))?;

    for entry_result in entries {
        let entry = entry_result
            .map_err(|e| DisclosureError::io(format!("Failed to read directory entry for: {purpose}"), dir, e))?;
        let path = entry.path();
        if path.is_file() && keep(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Create a directory and all of its parents if missing
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| DisclosureError::io(format!("Failed to create directory for: {purpose}"), path, e))
}

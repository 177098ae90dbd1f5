//! Disclosure archive extraction
//!
//! Each archive is unpacked into a scratch directory that lives exactly as long
//! as the [`ExtractedArchive`] guard. The CSV files inside are classified by
//! name and every file with a registered layout is filtered and normalized.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use regex::Regex;
use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::util::{list_files_sorted, safe_open_file};
use crate::error::{DisclosureError, Result};
use crate::filter::AllowList;
use crate::loader::normalize_disclosure;
use crate::reader::CsvOptions;
use crate::schema::{Category, SchemaRegistry};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_skipped};

static DISCLOSURE_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"OP_DTL_([A-Z]+)_PGYR([0-9]{4})").expect("disclosure file pattern is valid")
});

/// Category code and program year parsed from a disclosure file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileClassification {
    /// Category code as written in the name, e.g. `GNRL`
    pub code: String,
    /// Program year
    pub year: u16,
}

impl FileClassification {
    /// The category for the code, if it is one of the known categories
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::from_code(&self.code)
    }
}

/// Classify a file name of the form `OP_DTL_<CODE>_PGYR<YYYY>...`
///
/// Returns `None` for names that do not follow the pattern.
#[must_use]
pub fn classify_file_name(name: &str) -> Option<FileClassification> {
    let captures = DISCLOSURE_FILE_NAME.captures(name)?;
    let code = captures.get(1)?.as_str().to_string();
    let year = captures.get(2)?.as_str().parse().ok()?;
    Some(FileClassification { code, year })
}

/// An archive unpacked into a scratch directory
///
/// The scratch directory is removed when the guard is dropped, including when
/// processing fails part way.
#[derive(Debug)]
pub struct ExtractedArchive {
    source: PathBuf,
    scratch: TempDir,
    csv_files: Vec<PathBuf>,
}

impl ExtractedArchive {
    /// Path of the archive this was extracted from
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Scratch directory holding the extracted files
    #[must_use]
    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Top-level `.csv` files of the archive, sorted by name
    #[must_use]
    pub fn csv_files(&self) -> &[PathBuf] {
        &self.csv_files
    }

    /// Remove the scratch directory now, logging instead of failing on error
    pub fn close(self) {
        let scratch = self.scratch.path().to_path_buf();
        if let Err(e) = self.scratch.close() {
            log::warn!("Failed to remove scratch directory {}: {e}", scratch.display());
        }
    }
}

/// Extract every file of `path` into a fresh scratch directory
///
/// The scratch directory is created inside `scratch_root`, or the system
/// temporary directory when none is given.
pub fn extract_archive(path: &Path, scratch_root: Option<&Path>) -> Result<ExtractedArchive> {
    let file = safe_open_file(path, "reading disclosure archive")?;
    let mut archive = ZipArchive::new(file).map_err(|source| DisclosureError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let mut builder = tempfile::Builder::new();
    builder.prefix("disclosure-");
    let scratch = match scratch_root {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    }
    .map_err(|e| {
        let root = scratch_root.map_or_else(std::env::temp_dir, Path::to_path_buf);
        DisclosureError::io("Failed to create scratch directory", root, e)
    })?;

    archive
        .extract(scratch.path())
        .map_err(|source| DisclosureError::Archive {
            path: path.to_path_buf(),
            source,
        })?;

    let csv_files = list_files_sorted(scratch.path(), "listing extracted archive", |p| {
        p.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".csv"))
    })?;

    Ok(ExtractedArchive {
        source: path.to_path_buf(),
        scratch,
        csv_files,
    })
}

/// Extract `path` and normalize every disclosure file with a registered layout
///
/// Files whose names do not classify, whose category code is unknown, or whose
/// (category, year) has no registered columns are skipped. A missing column in
/// a registered file is an error.
pub fn process_archive(
    path: &Path,
    scratch_root: Option<&Path>,
    registry: &SchemaRegistry,
    allow_list: &AllowList,
    options: &CsvOptions,
) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Processing archive", path);

    let extracted = extract_archive(path, scratch_root)?;
    let mut tables = Vec::new();

    for csv_path in extracted.csv_files() {
        let name = csv_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(class) = classify_file_name(&name) else {
            log_skipped("file name does not match OP_DTL_<CODE>_PGYR<YYYY>", csv_path);
            continue;
        };
        log::info!("{} {}", class.code, class.year);

        let Some(category) = class.category() else {
            log_skipped("unknown category code", csv_path);
            continue;
        };
        let Some(columns) = registry.columns(category, class.year) else {
            log_skipped("no columns registered for category and year", csv_path);
            continue;
        };

        let table = normalize_disclosure(
            csv_path,
            columns,
            category,
            class.year,
            registry,
            allow_list,
            options,
        )?;
        tables.push(table);
    }

    extracted.close();
    log_operation_complete("processed", path, tables.len(), Some(start.elapsed()));
    Ok(tables)
}

/// Archives directly inside `dir` whose extension is exactly `extension`, sorted by name
pub fn find_archives(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    list_files_sorted(dir, "finding disclosure archives", |p| {
        p.extension().is_some_and(|ext| ext == extension)
    })
}

//! Recursive file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CsvError, Result};

/// Lists every regular file below `root`, descending into all subdirectories.
///
/// Symbolic links are followed; a link cycle is reported as
/// [`CsvError::DirectoryRead`]. No extension filtering is applied; see
/// [`has_extension`]. Entries are visited in file-name order within each
/// directory.
pub fn find_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.as_os_str().is_empty() {
        return Err(CsvError::invalid_argument("CSV files root directory is empty"));
    }
    if !root.is_dir() {
        return Err(CsvError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry_result in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry_result.map_err(|e| CsvError::DirectoryRead {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_file() {
            tracing::trace!(path = %path.display(), "Found file");
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), count = files.len(), "Listed files");
    Ok(files)
}

/// Returns true if `path` has extension `ext` (case-insensitive, without dot).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

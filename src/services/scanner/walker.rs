//! Member file enumeration inside a working directory.

use crate::types::errors::ScanError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the files directly inside `dir` whose extension is exactly `extension`.
///
/// Matching follows shell glob `*.ext` rules: case-sensitive, not recursive,
/// hidden files skipped. The result is sorted by file name in byte order, so
/// `B.spc` comes before `a.spc`.
pub fn collect_member_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut members = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        let is_hidden = entry.file_name().to_string_lossy().starts_with('.');
        if is_hidden || !path.is_file() {
            continue;
        }

        if path.extension().is_some_and(|ext| ext == extension) {
            members.push(path.to_path_buf());
        }
    }

    log::debug!(
        "Found {} .{extension} files in {}",
        members.len(),
        dir.display()
    );
    Ok(members)
}

/// Count regular files under `dir`, at any depth.
pub fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .count()
}

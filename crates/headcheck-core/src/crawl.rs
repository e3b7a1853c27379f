use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::HeaderError;

/// Version-control metadata directory that is never descended into.
const VCS_DIR: &str = ".git";

/// Every non-directory entry under `root`, sorted by name within each directory.
///
/// Any walk error aborts the crawl.
pub fn crawl(root: &Path) -> Result<Vec<PathBuf>, HeaderError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == VCS_DIR));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

//! Filesystem helpers shared by the checkers.
//!
//! Every enumeration helper returns paths in sorted order so repeated runs
//! over an unchanged tree report items in the same sequence.

use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Sorted subdirectories of `dir`. Files and unreadable entries are skipped.
///
/// A missing or unreadable `dir` yields an empty list.
#[must_use]
pub(crate) fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Sorted names of the files directly inside `dir`.
///
/// Symlinks are followed, so a link to a file counts as a file, matching
/// [`sorted_subdirs`] and [`sorted_glob`].
#[must_use]
pub(crate) fn sorted_file_names(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Files matching `<root>/<pattern>`, sorted.
///
/// `root` is escaped so that glob metacharacters in directory names are
/// matched literally. Unreadable matches are skipped.
pub(crate) fn sorted_glob(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{pattern}",
        glob::Pattern::escape(&root.to_string_lossy())
    );
    let mut files: Vec<PathBuf> = glob::glob(&full)?
        .flatten()
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Display `path` relative to `base` when it lies underneath it.
#[must_use]
pub(crate) fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

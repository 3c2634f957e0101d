use crate::core::error::{BruqError, Result};
use crate::syntax::keywords::MANIFEST_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Hard ceiling on traversal depth, whatever the caller asks for.
pub const MAX_DISCOVERY_DEPTH: usize = 10;

/// Dependency-cache directories that never hold collections worth finding.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules"];

/// Clamps untyped caller input (possibly negative) into `[0, MAX_DISCOVERY_DEPTH]`.
pub fn clamp_depth(requested: i64) -> usize {
    requested.clamp(0, MAX_DISCOVERY_DEPTH as i64) as usize
}

pub fn is_collection_root(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

fn is_excluded(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name)
}

/// Finds collection roots under `root`, at most `max_depth` levels below it.
///
/// A directory holding the manifest is a leaf: nothing beneath it is visited,
/// so nested collections are never reported. The result is sorted only for
/// stable display; callers should treat it as a set.
pub fn discover(root: &Path, max_depth: usize) -> Result<Vec<PathBuf>> {
    discover_with(root, max_depth, |_, _| {})
}

pub(crate) fn discover_with<F>(root: &Path, max_depth: usize, mut visit: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path, usize),
{
    let max_depth = max_depth.min(MAX_DISCOVERY_DEPTH);

    if !root.exists() {
        return Err(BruqError::DirectoryNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(BruqError::NotADirectory(root.display().to_string()));
    }
    let root = root.canonicalize()?;
    // An unreadable starting point is the one traversal failure worth raising.
    fs::read_dir(&root)?;

    let mut found = Vec::new();
    let mut work: Vec<(PathBuf, usize)> = vec![(root, 0)];

    while let Some((dir, depth)) = work.pop() {
        visit(&dir, depth);

        if is_collection_root(&dir) {
            log::debug!("Found collection at {}", dir.display());
            found.push(dir);
            continue;
        }
        if depth >= max_depth {
            continue;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Skipping unreadable directory {}: {e}", dir.display());
                continue;
            }
        };

        for entry in entries.flatten() {
            // `file_type` does not follow symlinks, so linked directories are skipped.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            if is_excluded(&entry.file_name().to_string_lossy()) {
                continue;
            }
            work.push((entry.path(), depth + 1));
        }
    }

    found.sort();
    Ok(found)
}

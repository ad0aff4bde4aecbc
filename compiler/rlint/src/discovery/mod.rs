//! Source file discovery.
//!
//! Collects the R files (`.R`, `.r`) named on the command line, walking
//! directories recursively.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::CliError;

/// Directories never worth descending into.
const SKIPPED_DIRS: &[&str] = &["target", "node_modules", "renv", "packrat", "__pycache__"];

/// `true` for `.R` and `.r` files.
pub fn is_r_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "R" || ext == "r")
}

/// Every R file under `roots`, sorted and deduplicated.
///
/// A root that is a file is taken as-is, whatever its extension: naming a
/// file explicitly is a request to check it. A root that does not exist is
/// an error.
pub fn discover_sources(roots: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
        } else if root.is_dir() {
            discover_recursive(root, &mut files);
        } else {
            return Err(CliError::NotFound(root.clone()));
        }
    }
    files.sort();
    files.dedup();
    debug!(roots = roots.len(), files = files.len(), "discovered sources");
    Ok(files)
}

fn discover_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        debug!(dir = %dir.display(), "unreadable directory skipped");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            if !SKIPPED_DIRS.contains(&name) {
                discover_recursive(&path, files);
            }
        } else if is_r_source(&path) {
            files.push(path);
        }
    }
}

// src/bundle/site_packages.rs

//! `python_version = "auto"`: find the package directory inside the venv
//! instead of trusting a pinned interpreter version.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::fs::FileSystem;

/// Look for exactly one `venv/lib/python3.N/site-packages` directory.
///
/// Returns `None` when the venv has no such directory, has several, or cannot
/// be listed. Callers keep the pinned path in that case.
pub fn discover_site_packages(fs: &dyn FileSystem, venv_dir: &Path) -> Option<PathBuf> {
    let lib_dir = venv_dir.join("lib");
    let entries = match fs.read_dir(&lib_dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %lib_dir.display(), error = %err, "cannot list venv lib dir");
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .into_iter()
        .filter(|p| is_python_lib_dir(p))
        .map(|p| p.join("site-packages"))
        .filter(|p| fs.is_dir(p))
        .collect();
    candidates.sort();

    match candidates.len() {
        1 => {
            let found = candidates.remove(0);
            debug!(path = %found.display(), "discovered site-packages");
            Some(found)
        }
        0 => {
            warn!(dir = %lib_dir.display(), "no python3.N/site-packages in venv");
            None
        }
        n => {
            warn!(
                dir = %lib_dir.display(),
                count = n,
                candidates = ?candidates,
                "several site-packages dirs in venv; not guessing"
            );
            None
        }
    }
}

fn is_python_lib_dir(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    match name.strip_prefix("python3.") {
        Some(minor) => !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

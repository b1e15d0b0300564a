// src/bundle/mod.rs

//! Bundle layout: where the launcher lives and what sits around it.
//!
//! - [`locate_self`] asks the OS for the running executable.
//! - [`paths`] turns that path into every other path by string joining only.
//! - [`site_packages`] optionally looks at the venv to pick the package
//!   directory when the interpreter version is not pinned.

pub mod paths;
pub mod site_packages;

use std::path::PathBuf;

use crate::errors::{LauncherError, Result};

pub use paths::{bundle_dir_of, derive_bundle_paths, BundleLayout, BundlePaths};
pub use site_packages::discover_site_packages;

/// Absolute path of the running launcher executable.
///
/// The path is used exactly as reported; symlinks are not resolved.
pub fn locate_self() -> Result<PathBuf> {
    let path = std::env::current_exe().map_err(LauncherError::PathResolution)?;
    if path.as_os_str().is_empty() {
        return Err(LauncherError::PathResolution(std::io::Error::other(
            "OS reported an empty executable path",
        )));
    }
    Ok(path)
}

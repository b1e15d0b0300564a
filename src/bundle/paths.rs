// src/bundle/paths.rs

//! Pure path derivation from the launcher's own location.
//!
//! Given the launcher at `P` and `D = dirname(P)`:
//!
//! ```text
//! D/ChroniclerPython                                   interpreter
//! D/chronicler.py                                      entry script
//! D/../Resources/venv                                  VIRTUAL_ENV
//! D/../Resources/venv/lib/python3.14/site-packages     PYTHONPATH
//! ```
//!
//! Nothing here touches the filesystem and nothing can fail. `..` is kept as
//! a literal component.

use std::path::{Path, PathBuf};

use crate::config::{LauncherConfig, DEFAULT_INTERPRETER, DEFAULT_SCRIPT};
use crate::types::DEFAULT_PYTHON_VERSION;

/// Names that vary between bundles; everything else is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    pub interpreter: String,
    pub script: String,
    pub python_version: String,
}

impl Default for BundleLayout {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script: DEFAULT_SCRIPT.to_string(),
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
        }
    }
}

impl From<&LauncherConfig> for BundleLayout {
    fn from(cfg: &LauncherConfig) -> Self {
        Self {
            interpreter: cfg.interpreter.clone(),
            script: cfg.script.clone(),
            python_version: cfg.python_version.pinned_or_default().to_string(),
        }
    }
}

/// Every path the launcher needs, all derived from one self path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePaths {
    pub bundle_dir: PathBuf,
    pub interpreter_path: PathBuf,
    pub script_path: PathBuf,
    pub venv_dir: PathBuf,
    pub package_search_path: PathBuf,
}

impl BundlePaths {
    pub fn derive(self_path: &Path, layout: &BundleLayout) -> Self {
        let bundle_dir = bundle_dir_of(self_path);
        let venv_dir = venv_dir_of(&bundle_dir);
        let package_search_path = site_packages_of(&venv_dir, &layout.python_version);

        Self {
            interpreter_path: bundle_dir.join(&layout.interpreter),
            script_path: bundle_dir.join(&layout.script),
            venv_dir,
            package_search_path,
            bundle_dir,
        }
    }
}

/// [`BundlePaths::derive`] with the stock Chronicler layout.
pub fn derive_bundle_paths(self_path: &Path) -> BundlePaths {
    BundlePaths::derive(self_path, &BundleLayout::default())
}

/// `dirname(self_path)`; a bare file name lives in `.`.
pub fn bundle_dir_of(self_path: &Path) -> PathBuf {
    match self_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        // Only a root (or empty path) has no parent.
        None if self_path.as_os_str().is_empty() => PathBuf::from("."),
        None => self_path.to_path_buf(),
    }
}

pub(crate) fn venv_dir_of(bundle_dir: &Path) -> PathBuf {
    bundle_dir.join("..").join("Resources").join("venv")
}

pub(crate) fn site_packages_of(venv_dir: &Path, python_version: &str) -> PathBuf {
    venv_dir
        .join("lib")
        .join(format!("python{python_version}"))
        .join("site-packages")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_stock_chronicler_layout() {
        let paths = derive_bundle_paths(Path::new(
            "/Applications/Chronicler.app/Contents/MacOS/Chronicler",
        ));
        let d = "/Applications/Chronicler.app/Contents/MacOS";

        assert_eq!(paths.bundle_dir, PathBuf::from(d));
        assert_eq!(
            paths.interpreter_path,
            PathBuf::from(format!("{d}/ChroniclerPython"))
        );
        assert_eq!(paths.script_path, PathBuf::from(format!("{d}/chronicler.py")));
        assert_eq!(
            paths.venv_dir.to_string_lossy(),
            format!("{d}/../Resources/venv")
        );
        assert_eq!(
            paths.package_search_path.to_string_lossy(),
            format!("{d}/../Resources/venv/lib/python3.14/site-packages")
        );
    }

    #[test]
    fn custom_layout_changes_only_names() {
        let layout = BundleLayout {
            interpreter: "py".into(),
            script: "app.py".into(),
            python_version: "3.12".into(),
        };
        let paths = BundlePaths::derive(Path::new("/x/bin/launch"), &layout);
        assert_eq!(paths.interpreter_path, PathBuf::from("/x/bin/py"));
        assert_eq!(paths.script_path, PathBuf::from("/x/bin/app.py"));
        assert_eq!(
            paths.package_search_path.to_string_lossy(),
            "/x/bin/../Resources/venv/lib/python3.12/site-packages"
        );
    }

    #[test]
    fn bare_file_name_lives_in_dot() {
        assert_eq!(bundle_dir_of(Path::new("Chronicler")), PathBuf::from("."));
        assert_eq!(bundle_dir_of(Path::new("")), PathBuf::from("."));
        assert_eq!(bundle_dir_of(Path::new("/Chronicler")), PathBuf::from("/"));
    }
}

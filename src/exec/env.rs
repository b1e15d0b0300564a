// src/exec/env.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

pub const VIRTUAL_ENV_VAR: &str = "VIRTUAL_ENV";
pub const PYTHONPATH_VAR: &str = "PYTHONPATH";

/// The two variables that point the bundled interpreter at the private venv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEnvironment {
    pub virtual_env: PathBuf,
    pub python_path: PathBuf,
}

impl ChildEnvironment {
    pub fn new(venv_dir: &Path, package_search_path: &Path) -> Self {
        Self {
            virtual_env: venv_dir.to_path_buf(),
            python_path: package_search_path.to_path_buf(),
        }
    }

    pub fn vars(&self) -> [(&'static str, OsString); 2] {
        [
            (VIRTUAL_ENV_VAR, self.virtual_env.clone().into_os_string()),
            (PYTHONPATH_VAR, self.python_path.clone().into_os_string()),
        ]
    }

    /// Set both variables on `cmd`, on top of whatever it inherits.
    pub fn apply_to(&self, cmd: &mut Command) {
        cmd.envs(self.vars());
    }

    /// Overwrite both variables in the launcher's own environment.
    ///
    /// # Safety
    ///
    /// No other thread may read or write the process environment while this
    /// runs (see [`std::env::set_var`]).
    pub unsafe fn apply_to_process(&self) {
        for (key, value) in self.vars() {
            debug!(key, value = ?value, "setting child environment variable");
            // SAFETY: guaranteed by the caller.
            unsafe { std::env::set_var(key, value) };
        }
    }
}

/// Set `VIRTUAL_ENV=venv_dir` and `PYTHONPATH=package_search_path` for this
/// process, replacing any previous values. The spawned child inherits them.
///
/// # Safety
///
/// Same contract as [`ChildEnvironment::apply_to_process`]: call it while the
/// launcher is still single-threaded.
pub unsafe fn configure_child_environment(
    venv_dir: &Path,
    package_search_path: &Path,
) -> ChildEnvironment {
    let env = ChildEnvironment::new(venv_dir, package_search_path);
    // SAFETY: guaranteed by the caller.
    unsafe { env.apply_to_process() };
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vars_are_in_fixed_order() {
        let env = ChildEnvironment::new(
            Path::new("/b/../Resources/venv"),
            Path::new("/b/../Resources/venv/lib/python3.14/site-packages"),
        );
        let vars = env.vars();
        assert_eq!(vars[0].0, "VIRTUAL_ENV");
        assert_eq!(vars[0].1, OsString::from("/b/../Resources/venv"));
        assert_eq!(vars[1].0, "PYTHONPATH");
        assert_eq!(
            vars[1].1,
            OsString::from("/b/../Resources/venv/lib/python3.14/site-packages")
        );
    }
}

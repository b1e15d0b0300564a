// src/exec/workdir.rs

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{LauncherError, Result};
use crate::types::WorkingDirPolicy;

/// `chdir` into `dir` before the child is spawned.
///
/// With [`WorkingDirPolicy::Warn`] a failure is logged and the launch goes
/// on from the current directory; with [`WorkingDirPolicy::Fatal`] it aborts.
pub fn change_working_directory(dir: &Path, policy: WorkingDirPolicy) -> Result<()> {
    match std::env::set_current_dir(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "changed working directory");
            Ok(())
        }
        Err(source) => match policy {
            WorkingDirPolicy::Warn => {
                warn!(
                    dir = %dir.display(),
                    error = %source,
                    "cannot change working directory; continuing"
                );
                Ok(())
            }
            WorkingDirPolicy::Fatal => Err(LauncherError::WorkingDirectory {
                dir: dir.to_path_buf(),
                source,
            }),
        },
    }
}

// src/config/validate.rs

use crate::config::model::{LauncherConfig, LauncherSection, RawLauncherConfig};
use crate::errors::{LauncherError, Result};

impl TryFrom<RawLauncherConfig> for LauncherConfig {
    type Error = LauncherError;

    fn try_from(raw: RawLauncherConfig) -> std::result::Result<Self, Self::Error> {
        validate_section(&raw.launcher)?;
        Ok(LauncherConfig::new_unchecked(raw.launcher))
    }
}

fn validate_section(section: &LauncherSection) -> Result<()> {
    validate_file_name("interpreter", &section.interpreter)?;
    validate_file_name("script", &section.script)?;
    Ok(())
}

/// Interpreter and script live directly next to the launcher; anything that
/// could escape that directory is rejected.
fn validate_file_name(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LauncherError::Config(format!(
            "[launcher].{key} must not be empty"
        )));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(LauncherError::Config(format!(
            "[launcher].{key} must be a bare file name (got {value:?})"
        )));
    }
    if value == "." || value == ".." {
        return Err(LauncherError::Config(format!(
            "[launcher].{key} must name a file (got {value:?})"
        )));
    }
    Ok(())
}

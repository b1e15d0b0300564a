// src/config/model.rs

use serde::Deserialize;

use crate::types::{LogLevel, PythonVersion, WorkingDirPolicy};

/// Default interpreter binary shipped next to the launcher.
pub const DEFAULT_INTERPRETER: &str = "ChroniclerPython";

/// Default application entry script shipped next to the launcher.
pub const DEFAULT_SCRIPT: &str = "chronicler.py";

/// Optional `launcher.toml`, read from the bundle's `Resources` directory.
///
/// ```toml
/// [launcher]
/// interpreter = "ChroniclerPython"
/// script = "chronicler.py"
/// python_version = "3.14"     # or "auto"
/// working_dir_policy = "warn" # or "fatal"
/// forward_args = false
/// forward_signals = true
/// log_level = "warn"
/// ```
///
/// Every key is optional; a bundle without the file behaves exactly like one
/// with an empty file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLauncherConfig {
    #[serde(default)]
    pub launcher: LauncherSection,
}

/// `[launcher]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherSection {
    /// File name of the bundled interpreter, relative to the launcher's
    /// directory. Never looked up on `PATH`.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// File name of the entry script, relative to the launcher's directory.
    #[serde(default = "default_script")]
    pub script: String,

    #[serde(default)]
    pub python_version: PythonVersion,

    #[serde(default)]
    pub working_dir_policy: WorkingDirPolicy,

    /// Append the launcher's own arguments after the script path.
    #[serde(default)]
    pub forward_args: bool,

    /// Relay SIGTERM / SIGHUP to the child while waiting (Unix only).
    #[serde(default = "default_forward_signals")]
    pub forward_signals: bool,

    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

fn default_script() -> String {
    DEFAULT_SCRIPT.to_string()
}

fn default_forward_signals() -> bool {
    true
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            python_version: PythonVersion::default(),
            working_dir_policy: WorkingDirPolicy::default(),
            forward_args: false,
            forward_signals: default_forward_signals(),
            log_level: None,
        }
    }
}

/// Validated launcher configuration.
///
/// Only obtainable through `TryFrom<RawLauncherConfig>` (see `validate.rs`)
/// or [`LauncherConfig::default`].
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub interpreter: String,
    pub script: String,
    pub python_version: PythonVersion,
    pub working_dir_policy: WorkingDirPolicy,
    pub forward_args: bool,
    pub forward_signals: bool,
    pub log_level: Option<LogLevel>,
}

impl LauncherConfig {
    pub(crate) fn new_unchecked(section: LauncherSection) -> Self {
        Self {
            interpreter: section.interpreter,
            script: section.script,
            python_version: section.python_version,
            working_dir_policy: section.working_dir_policy,
            forward_args: section.forward_args,
            forward_signals: section.forward_signals,
            log_level: section.log_level,
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::new_unchecked(LauncherSection::default())
    }
}

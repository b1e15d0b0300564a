use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Interpreter version used to build `lib/python<version>/site-packages`.
pub const DEFAULT_PYTHON_VERSION: &str = "3.14";

/// Log level accepted in `launcher.toml` and `CHRONICLER_LAUNCHER_LOG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("invalid log level: {other}")),
        }
    }
}

/// What to do when the launcher cannot `chdir` into the bundle directory.
///
/// - `Warn`: log a warning and start the child anyway (default).
/// - `Fatal`: abort with a working-directory error before spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingDirPolicy {
    Warn,
    Fatal,
}

impl Default for WorkingDirPolicy {
    fn default() -> Self {
        WorkingDirPolicy::Warn
    }
}

impl FromStr for WorkingDirPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warn" => Ok(WorkingDirPolicy::Warn),
            "fatal" => Ok(WorkingDirPolicy::Fatal),
            other => Err(format!(
                "invalid working_dir_policy: {other} (expected \"warn\" or \"fatal\")"
            )),
        }
    }
}

/// Interpreter version selector for the package search path.
///
/// `Pinned("3.14")` builds the path by string concatenation only; `Auto`
/// asks the launcher to look inside `venv/lib` for the one `python3.N`
/// directory that exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PythonVersion {
    Pinned(String),
    Auto,
}

impl PythonVersion {
    /// Version string used for derivation. `Auto` derives with the default
    /// pin and is refined later by discovery.
    pub fn pinned_or_default(&self) -> &str {
        match self {
            PythonVersion::Pinned(v) => v,
            PythonVersion::Auto => DEFAULT_PYTHON_VERSION,
        }
    }
}

impl Default for PythonVersion {
    fn default() -> Self {
        PythonVersion::Pinned(DEFAULT_PYTHON_VERSION.to_string())
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PythonVersion::Pinned(v) => f.write_str(v),
            PythonVersion::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for PythonVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(PythonVersion::Auto);
        }

        let valid = match s.split_once('.') {
            Some((major, minor)) => is_number(major) && is_number(minor),
            None => false,
        };
        if !valid {
            return Err(format!(
                "invalid python_version: {s:?} (expected MAJOR.MINOR such as \"3.14\", or \"auto\")"
            ));
        }
        Ok(PythonVersion::Pinned(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for PythonVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

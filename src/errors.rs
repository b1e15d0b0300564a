// src/errors.rs

//! Crate-wide error type.
//!
//! Every failure the launcher can hit is terminal: it is reported once on
//! stderr by `main` and the process exits with [`LauncherError::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("cannot resolve launcher executable path: {0}")]
    PathResolution(#[source] std::io::Error),

    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for child process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("cannot change working directory to {}: {source}", dir.display())]
    WorkingDirectory {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    /// Exit code the launcher terminates with when this error aborts startup.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LauncherError>;

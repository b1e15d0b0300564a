// src/config/mod.rs

//! Optional launcher configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Locate and load `launcher.toml` from the bundle (`loader.rs`).
//! - Validate file names before they are joined onto the bundle dir (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{config_path_for, load_from_path, load_or_default, ConfigSource, CONFIG_FILE_NAME};
pub use model::{LauncherConfig, LauncherSection, RawLauncherConfig, DEFAULT_INTERPRETER, DEFAULT_SCRIPT};

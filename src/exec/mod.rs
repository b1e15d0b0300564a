// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`env`] sets `VIRTUAL_ENV` / `PYTHONPATH` for the child.
//! - [`workdir`] moves the launcher into the bundle directory.
//! - [`spawn`] starts the interpreter with `tokio::process::Command` and
//!   turns its exit status into the launcher's exit code.
//! - [`signals`] relays termination signals to the child while waiting
//!   (Unix only).

pub mod env;
pub mod spawn;
#[cfg(unix)]
pub mod signals;
pub mod workdir;

pub use env::{configure_child_environment, ChildEnvironment, PYTHONPATH_VAR, VIRTUAL_ENV_VAR};
pub use spawn::{spawn_and_wait, ChildExit, LaunchCommand};
pub use workdir::change_working_directory;

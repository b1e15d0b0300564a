// src/exec/spawn.rs

//! Start the bundled interpreter and wait for it.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{LauncherError, Result};
use crate::exec::env::ChildEnvironment;

/// Everything needed to start the child: `program args...` with `env` on
/// top of the inherited environment.
#[derive(Debug, Clone)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub env: ChildEnvironment,
    pub forward_signals: bool,
}

/// How the child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Normal termination with this status code.
    Exited(i32),
    /// Killed by this signal number (Unix).
    Signaled(i32),
    /// Neither a code nor a signal was reported.
    Unknown,
}

impl ChildExit {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildExit::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ChildExit::Signaled(signal);
            }
        }
        ChildExit::Unknown
    }

    /// Code the launcher itself exits with: the child's own code, or
    /// `128 + signo` for a signal death.
    pub fn exit_code(self) -> i32 {
        match self {
            ChildExit::Exited(code) => code,
            ChildExit::Signaled(signal) => 128 + signal,
            ChildExit::Unknown => 1,
        }
    }
}

/// Spawn `cmd.program` with `argv[0] = program` and block until it exits.
///
/// stdin/stdout/stderr are inherited. A spawn failure (missing binary,
/// permission denied, resource limits) is [`LauncherError::Spawn`]; a failed
/// wait is [`LauncherError::Wait`].
pub async fn spawn_and_wait(cmd: &LaunchCommand) -> Result<ChildExit> {
    // Register handlers before the child exists so an early SIGTERM is
    // relayed instead of killing the launcher.
    #[cfg(unix)]
    let forwarder = if cmd.forward_signals {
        crate::exec::signals::SignalForwarder::register()
    } else {
        None
    };

    let mut command = Command::new(&cmd.program);
    command.args(&cmd.args);
    cmd.env.apply_to(&mut command);

    info!(program = %cmd.program.display(), args = ?cmd.args, "spawning child");

    let mut child = command.spawn().map_err(|source| LauncherError::Spawn {
        program: cmd.program.clone(),
        source,
    })?;
    debug!(pid = child.id(), "child started");

    #[cfg(unix)]
    let status = match forwarder {
        Some(mut forwarder) => forwarder.wait(&mut child).await,
        None => child.wait().await,
    };
    #[cfg(not(unix))]
    let status = child.wait().await;

    let exit = ChildExit::from_status(status.map_err(LauncherError::Wait)?);
    match exit {
        ChildExit::Exited(code) => info!(exit_code = code, "child exited"),
        ChildExit::Signaled(signal) => {
            warn!(signal, exit_code = exit.exit_code(), "child killed by signal")
        }
        ChildExit::Unknown => warn!("child exit status unavailable"),
    }
    Ok(exit)
}

// src/exec/signals.rs

//! Relay termination signals from the launcher to the child.
//!
//! SIGTERM, SIGHUP and SIGINT are forwarded to the child. A terminal Ctrl-C
//! therefore reaches the child twice: once from the tty, once relayed.

use std::io;
use std::process::ExitStatus;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::process::Child;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

pub struct SignalForwarder {
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
}

impl SignalForwarder {
    /// Install the handlers. Returns `None` (and logs) if any of them cannot
    /// be registered; the caller then waits without forwarding.
    pub fn register() -> Option<Self> {
        match Self::try_register() {
            Ok(forwarder) => Some(forwarder),
            Err(err) => {
                warn!(error = %err, "cannot install signal handlers; not forwarding signals");
                None
            }
        }
    }

    fn try_register() -> io::Result<Self> {
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
            interrupt: signal(SignalKind::interrupt())?,
        })
    }

    /// Wait for `child`, relaying signals until it exits.
    pub async fn wait(&mut self, child: &mut Child) -> io::Result<ExitStatus> {
        let Some(pid) = child.id() else {
            return child.wait().await;
        };
        loop {
            tokio::select! {
                status = child.wait() => return status,
                Some(()) = self.terminate.recv() => forward(pid, Signal::SIGTERM),
                Some(()) = self.hangup.recv() => forward(pid, Signal::SIGHUP),
                Some(()) = self.interrupt.recv() => forward(pid, Signal::SIGINT),
            }
        }
    }
}

fn forward(pid: u32, sig: Signal) {
    let Ok(raw) = i32::try_from(pid) else {
        warn!(pid, signal = %sig, "child pid out of range; not forwarding");
        return;
    };
    match kill(Pid::from_raw(raw), sig) {
        Ok(()) => info!(pid = raw, signal = %sig, "forwarded signal to child"),
        Err(errno) => warn!(pid = raw, signal = %sig, error = %errno, "failed to forward signal"),
    }
}

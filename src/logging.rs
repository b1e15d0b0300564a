// src/logging.rs

//! Logging setup for the launcher using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `log_level` in `launcher.toml` (if provided)
//! 2. `CHRONICLER_LAUNCHER_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`, so a successful launch prints nothing
//!
//! Logs are sent to STDERR; stdout belongs to the child.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::types::LogLevel;

/// Environment variable consulted when the config file sets no level.
pub const LOG_ENV_VAR: &str = "CHRONICLER_LAUNCHER_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(config_level: Option<LogLevel>) -> Result<()> {
    let level = level_from_log_level(resolve_level(
        config_level,
        std::env::var(LOG_ENV_VAR).ok().as_deref(),
    ));

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn resolve_level(config_level: Option<LogLevel>, env_value: Option<&str>) -> LogLevel {
    config_level
        .or_else(|| env_value.and_then(|s| s.parse().ok()))
        .unwrap_or(LogLevel::Warn)
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

// ABOUTME: Installs the global tracing subscriber for a tokenweave run
// ABOUTME: Composes the configured sinks under one level filter

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;
use crate::layers::{Sinks, build_sinks, env_filter};

/// Keeps background log writers alive; drop it at the end of `main`.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_subscriber(config: LoggingConfig) -> Result<LoggingGuard> {
    let filter = env_filter(&config).context("Failed to build log filter")?;
    let Sinks { layers, file_guard } = build_sinks(&config)?;

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::debug!(
        level = %config.level,
        json = config.output.json,
        file = ?config.output.file.then(|| config.file.path.clone()),
        "Logging initialized"
    );

    Ok(LoggingGuard { _file: file_guard })
}

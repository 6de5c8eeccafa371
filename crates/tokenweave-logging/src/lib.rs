// ABOUTME: Structured logging for the tokenweave crates, built on tracing
// ABOUTME: Re-exports the tracing macros and installs the subscriber described by LoggingConfig

pub mod config;
pub mod layers;
pub mod subscriber;

// Re-export tracing macros so pipeline crates depend on this crate only
pub use tracing::{Level, debug, error, info, instrument, trace, warn};

pub use config::{LogLevel, LoggingConfig};
pub use subscriber::{LoggingGuard, init_subscriber};

/// Install logging with a caller-adjusted configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> anyhow::Result<LoggingGuard> {
    init_subscriber(config)
}

// ABOUTME: Logging configuration for the tokenweave pipeline
// ABOUTME: Level directives, output sinks and the environment variables that override them

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Global level, e.g. `TOKENWEAVE_LOG=debug`
pub const ENV_LEVEL: &str = "TOKENWEAVE_LOG";
/// Standard directive list, consulted when `TOKENWEAVE_LOG` is unset
pub const ENV_DIRECTIVES: &str = "RUST_LOG";
/// Any value switches stderr output to JSON lines
pub const ENV_JSON: &str = "TOKENWEAVE_LOG_JSON";
/// Enables file output; a non-empty value replaces the default path
pub const ENV_FILE: &str = "TOKENWEAVE_LOG_FILE";

/// A `tracing::Level` that reads and writes as a lowercase name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(pub Level);

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            _ => bail!("Unknown log level '{s}', expected trace, debug, info, warn or error"),
        };
        Ok(Self(level))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        Self(level)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_string().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,

    /// Per-target overrides such as `tokenweave_core = "trace"`
    pub module_levels: BTreeMap<String, LogLevel>,

    pub output: OutputConfig,

    pub file: FileConfig,
}

/// Which sinks receive events. Console and JSON both write to stderr;
/// stdout carries the command summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub console: bool,
    pub file: bool,
    pub json: bool,
    pub pretty_console: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            // pipeline runs are quiet unless something is off
            level: LogLevel(Level::WARN),
            module_levels: BTreeMap::new(),
            output: OutputConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: false,
            json: false,
            pretty_console: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        let path = dirs::cache_dir()
            .map(|dir| dir.join("tokenweave"))
            .unwrap_or_default()
            .join("tokenweave.log");
        Self { path }
    }
}

impl LoggingConfig {
    /// Defaults with the process environment applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(level) = lookup(ENV_LEVEL) {
            self.level = level
                .parse()
                .with_context(|| format!("Invalid {ENV_LEVEL} value"))?;
        } else if let Some(directives) = lookup(ENV_DIRECTIVES) {
            self.apply_directives(&directives)
                .with_context(|| format!("Invalid {ENV_DIRECTIVES} value"))?;
        }

        if lookup(ENV_JSON).is_some() {
            self.output.json = true;
            self.output.console = false;
        }

        if let Some(path) = lookup(ENV_FILE) {
            self.output.file = true;
            if !path.is_empty() {
                self.file.path = PathBuf::from(path);
            }
        }

        Ok(())
    }

    /// Apply a `RUST_LOG`-style list: `info,tokenweave_core=debug`.
    pub fn apply_directives(&mut self, directives: &str) -> Result<()> {
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    self.module_levels
                        .insert(target.trim().to_string(), level.parse()?);
                }
                None => self.level = directive.parse()?,
            }
        }
        Ok(())
    }
}

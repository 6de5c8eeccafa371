// ABOUTME: Builds the tracing layers selected by the logging configuration
// ABOUTME: stderr console or JSON output, an optional daily log file, and the level filter

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{FileConfig, LoggingConfig, OutputConfig};

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Layers for every enabled sink, plus the guard of the file writer if any
pub struct Sinks {
    pub layers: Vec<BoxedLayer>,
    pub file_guard: Option<WorkerGuard>,
}

pub fn build_sinks(config: &LoggingConfig) -> Result<Sinks> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.extend(console_layer(&config.output));
    layers.extend(json_layer(&config.output));

    let mut file_guard = None;
    if config.output.file {
        let (layer, guard) = file_layer(&config.file)?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    Ok(Sinks { layers, file_guard })
}

/// Human-readable events on stderr
pub fn console_layer(output: &OutputConfig) -> Option<BoxedLayer> {
    if !output.console {
        return None;
    }

    let base = fmt::layer().with_writer(std::io::stderr);
    Some(if output.pretty_console {
        base.pretty()
            .with_file(false)
            .with_span_events(FmtSpan::CLOSE)
            .boxed()
    } else {
        // short runs; timestamps are noise here
        base.compact().without_time().with_target(false).boxed()
    })
}

/// One JSON object per event on stderr, including span open/close
pub fn json_layer(output: &OutputConfig) -> Option<BoxedLayer> {
    output.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .boxed()
    })
}

/// Daily-rotated plain-text log file.
///
/// Events are written on a background thread; keep the guard alive until exit.
pub fn file_layer(file: &FileConfig) -> Result<(BoxedLayer, WorkerGuard)> {
    let (directory, file_name) = split_log_path(&file.path)?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(directory, file_name));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_line_number(true)
        .boxed();

    Ok((layer, guard))
}

fn split_log_path(path: &Path) -> Result<(&Path, &str)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Log file path has no usable file name: {}", path.display()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok((directory, file_name))
}

/// Level filter: the global level plus per-target directives
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    config
        .module_levels
        .iter()
        .try_fold(EnvFilter::new(config.level.to_string()), |filter, (target, level)| {
            let directive = format!("{target}={level}")
                .parse::<Directive>()
                .with_context(|| format!("Invalid log directive for '{target}'"))?;
            Ok(filter.add_directive(directive))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use tempfile::tempdir;
    use tracing::Level;

    #[test]
    fn test_sink_selection() {
        let mut config = LoggingConfig::default();
        assert_eq!(build_sinks(&config).unwrap().layers.len(), 1);

        config.output = OutputConfig {
            console: false,
            json: true,
            ..OutputConfig::default()
        };
        let sinks = build_sinks(&config).unwrap();
        assert_eq!(sinks.layers.len(), 1);
        assert!(sinks.file_guard.is_none());

        config.output.json = false;
        assert!(build_sinks(&config).unwrap().layers.is_empty());
    }

    #[test]
    fn test_file_sink_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let mut config = LoggingConfig::default();
        config.output.file = true;
        config.file.path = temp_dir.path().join("logs").join("run.log");

        let sinks = build_sinks(&config).unwrap();
        assert_eq!(sinks.layers.len(), 2);
        assert!(sinks.file_guard.is_some());
        assert!(temp_dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path(Path::new("run.log")).unwrap(),
            (Path::new("."), "run.log")
        );
        assert!(split_log_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_env_filter_with_targets() {
        let mut config = LoggingConfig::default();
        config
            .module_levels
            .insert("tokenweave_core::remap".to_string(), LogLevel(Level::TRACE));
        let filter = env_filter(&config).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("tokenweave_core::remap=trace"), "{rendered}");
    }
}

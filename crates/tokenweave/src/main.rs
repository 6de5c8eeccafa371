use std::io;
use std::panic;

use anyhow::{Context, Result};
use clap::Parser;
use tokenweave_logging::{LoggingGuard, instrument};

mod cli;
mod commands;
mod config;

use cli::{Cli, Command};
use commands::Project;

fn setup_logging(verbosity: u8) -> Result<LoggingGuard> {
    use tokenweave_logging::{LoggingConfig, init_logging_with_config};

    let mut config =
        LoggingConfig::from_env().context("Failed to create logging config from environment")?;

    // Override log level based on command line verbosity
    let level = match verbosity {
        0 => tokenweave_logging::Level::WARN,
        1 => tokenweave_logging::Level::INFO,
        2 => tokenweave_logging::Level::DEBUG,
        _3_or_more => tokenweave_logging::Level::TRACE,
    };
    config.level = level.into();

    let guard = init_logging_with_config(config).context("Failed to initialize tokenweave logging")?;
    tokenweave_logging::debug!("tokenweave logging system initialized");

    Ok(guard)
}

#[instrument]
fn install_panic_handler() {
    panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));

        let panic_message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        tokenweave_logging::error!(
            panic_message = %panic_message,
            location = ?location,
            version = env!("CARGO_PKG_VERSION"),
            "Application panic occurred"
        );

        eprintln!("Fatal error: {panic_message}");
        if let Some(loc) = &location {
            eprintln!("Location: {loc}");
        }
        std::process::exit(1);
    }));
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(&cli.root, cli.config.as_deref())?;
    let project = Project::new(&cli.root, config);

    let mut out = io::stdout().lock();
    let mut err = io::stderr();

    match cli.command {
        Command::Restructure => {
            commands::restructure(&project, &mut out)?;
        }
        Command::Overrides => {
            commands::overrides(&project, &mut out, &mut err)?;
        }
        Command::Remap {
            per_file,
            output,
            inputs,
        } => {
            commands::remap(&project, &inputs, per_file, output.as_deref(), &mut out)?;
        }
        Command::All => {
            commands::restructure(&project, &mut out)?;
            commands::overrides(&project, &mut out, &mut err)?;

            let css_input = project.layout.css_build_dir().join(&project.config.css.input);
            if css_input.exists() {
                commands::remap(&project, &[], false, None, &mut out)?;
            } else {
                // compiled CSS comes from an external build step
                tokenweave_logging::warn!(
                    path = %css_input.display(),
                    "Compiled CSS not found, skipping remap"
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.verbose)?;
    install_panic_handler();

    run(cli)
}

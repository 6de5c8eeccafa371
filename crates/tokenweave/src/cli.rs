// ABOUTME: Command line definition for the tokenweave binary
// ABOUTME: Global project options plus one subcommand per pipeline stage

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tokenweave", version)]
#[command(about = "Migrate legacy design tokens and derive build configuration")]
pub struct Cli {
    /// Project root holding the token directories
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (default: <root>/tokenweave.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increases logging verbosity each use for up to 3 times
    #[arg(short, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert the legacy token tree into the design-tokens layout
    Restructure,

    /// Compare generated colors with the legacy sources and write the build config
    Overrides,

    /// Re-export compiled CSS variables as an @theme block
    Remap {
        /// Write one output per input instead of a single aggregate file
        #[arg(long)]
        per_file: bool,

        /// Output file for aggregate mode
        #[arg(short, long, conflicts_with = "per_file")]
        output: Option<PathBuf>,

        /// Compiled CSS files, relative to the root (default: the configured build input)
        inputs: Vec<PathBuf>,
    },

    /// Restructure, then overrides, then remap with defaults
    All,
}

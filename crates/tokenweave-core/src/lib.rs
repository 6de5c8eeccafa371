// ABOUTME: Token pipeline components built on the shared data types
// ABOUTME: Restructurer, override differencer and CSS variable remapper plus their file helpers

pub mod error;
pub mod fs;
pub mod ids;
pub mod layout;
pub mod overrides;
pub mod remap;
pub mod restructure;

#[cfg(test)]
mod integration_tests;

pub use error::{Result, TokenError};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use layout::ProjectLayout;
pub use overrides::{
    BuildConfig, MissingMapping, OverrideDifferencer, OverrideEntry, OverrideReport, OverrideTable,
};
pub use remap::{CssCategory, FanOut, RemapReport, Remapper, VariableRecord};
pub use restructure::{RestructureReport, Restructurer};

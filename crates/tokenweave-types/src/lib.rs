// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other tokenweave crates

pub mod config;
pub mod mode;
pub mod registry;
pub mod roles;
pub mod token;

// Re-export commonly used types
pub use config::{
    CssConfig, FamilyBinding, FocusConfig, PathConfig, PipelineConfig, SeedColors, ShadeSource,
    ThemeConfig,
};
pub use mode::ColorMode;
pub use registry::{RegistryEntry, ThemeEntry, ThemeGroup, TokenSetStatus};
pub use roles::{SHADE_COUNT, SemanticRole, Shade};
pub use token::{Token, TokenPath, TokenTree};

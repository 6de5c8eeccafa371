// ABOUTME: Loads the pipeline configuration from tokenweave.toml
// ABOUTME: Missing file means built-in defaults; suspicious values are logged, not rejected

use std::path::Path;

use anyhow::Context;
use tokenweave_types::PipelineConfig;

pub const CONFIG_FILE: &str = "tokenweave.toml";

/// Load configuration from an explicit file, or `<root>/tokenweave.toml` if it exists.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    let default_path = root.join(CONFIG_FILE);
    let path = explicit.unwrap_or(&default_path);

    tokenweave_logging::info!(
        config_path = %path.display(),
        config_exists = path.exists(),
        "Loading pipeline configuration"
    );

    let config = if explicit.is_some() || path.exists() {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: PipelineConfig = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        tokenweave_logging::info!(
            themes = config.themes.len(),
            output_dir = %config.paths.output_dir,
            "Loaded pipeline configuration"
        );
        config
    } else {
        tokenweave_logging::info!("No configuration file found, using defaults");
        PipelineConfig::default()
    };

    validate(&config);
    Ok(config)
}

fn validate(config: &PipelineConfig) {
    if config.themes.is_empty() {
        tokenweave_logging::warn!("No themes configured, nothing will be generated");
    }

    let families = config.all_families();
    for theme in &config.themes {
        for binding in theme.bindings_with(&config.shared_families) {
            if !families.contains(&binding.name) {
                tokenweave_logging::warn!(
                    theme = %theme.name,
                    family = %binding.name,
                    "Family has no theme or semantic block"
                );
            }
        }
    }

    if !families.contains(&config.focus.family) {
        tokenweave_logging::warn!(family = %config.focus.family, "Unknown focus family");
    }
}

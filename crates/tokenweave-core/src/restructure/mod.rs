// ABOUTME: Token restructurer converting the legacy token tree into the design-tokens layout
// ABOUTME: Resolves all inputs first, then writes primitives, themes, semantic layer and manifests

pub mod builders;
pub mod manifest;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;
use tokenweave_logging::{debug, info, instrument};
use tokenweave_types::{ColorMode, PipelineConfig, ThemeGroup, TokenTree};

use crate::error::Result;
use crate::fs::{read_json, read_tree, write_json};
use crate::ids::IdGenerator;
use crate::layout::{ProjectLayout, sets};

/// Legacy color-scheme trees, one per mode
#[derive(Debug, Clone)]
pub struct LegacyColorSchemes {
    pub light: TokenTree,
    pub dark: TokenTree,
}

impl LegacyColorSchemes {
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        Ok(Self {
            light: read_tree(&layout.legacy_color_scheme(ColorMode::Light))?,
            dark: read_tree(&layout.legacy_color_scheme(ColorMode::Dark))?,
        })
    }

    pub fn get(&self, mode: ColorMode) -> &TokenTree {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }
}

/// Outcome of a restructure run
#[derive(Debug, Clone, Default)]
pub struct RestructureReport {
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Registry entries generated for the owned groups
    pub generated_entries: usize,
    /// Registry entries carried over untouched
    pub preserved_entries: usize,
}

pub struct Restructurer<'a> {
    config: &'a PipelineConfig,
    layout: &'a ProjectLayout,
}

impl<'a> Restructurer<'a> {
    pub fn new(config: &'a PipelineConfig, layout: &'a ProjectLayout) -> Self {
        Self { config, layout }
    }

    /// Regenerate every output file.
    ///
    /// All documents are built in memory before the first write, so a missing
    /// legacy token leaves the output tree untouched.
    #[instrument(skip_all, fields(root = %self.layout.root().display()))]
    pub fn run(&self, ids: &mut dyn IdGenerator) -> Result<RestructureReport> {
        let legacy = LegacyColorSchemes::load(self.layout)?;
        let mut documents = self.build_documents(&legacy)?;

        let metadata_path = self.layout.metadata();
        let metadata = manifest::rewrite_metadata(
            read_tree(&metadata_path)?,
            &self.config.token_set_order,
        );
        documents.insert(metadata_path, Value::Object(metadata));

        let registry_path = self.layout.registry();
        let existing: Vec<Value> = read_json(&registry_path)?;
        let replaced = existing
            .iter()
            .filter(|entry| ThemeGroup::of_entry(entry).is_some())
            .count();
        let preserved = existing.len() - replaced;
        let registry = manifest::rebuild_registry(existing, self.config, ids);
        let generated = registry.len() - preserved;
        debug!(replaced, preserved, generated, "Rebuilt theme registry");

        let mut report = RestructureReport {
            generated_entries: generated,
            preserved_entries: preserved,
            ..Default::default()
        };

        for (path, document) in &documents {
            write_json(path, document)?;
            report.written.push(path.clone());
        }
        write_json(&registry_path, &registry)?;
        report.written.push(registry_path);

        info!(files = report.written.len(), "Token restructure complete");
        Ok(report)
    }

    /// Build the primitive, theme, semantic and mode documents keyed by output path
    pub fn build_documents(
        &self,
        legacy: &LegacyColorSchemes,
    ) -> Result<IndexMap<PathBuf, Value>> {
        let mut documents = IndexMap::new();

        for theme in &self.config.themes {
            for mode in ColorMode::ALL {
                let source = self.layout.legacy_color_scheme(mode);
                let tree = builders::color_scheme(self.config, theme, legacy.get(mode), &source)?;
                debug!(theme = %theme.name, mode = %mode, "Built color scheme");
                documents.insert(
                    self.layout.token_set(&sets::color_scheme(mode, &theme.name)),
                    Value::Object(tree),
                );
            }
        }

        for theme in &self.config.themes {
            let legacy_theme = read_tree(&self.layout.legacy_theme(&theme.name))?;
            let tree = builders::theme_file(self.config, &legacy_theme);
            documents.insert(
                self.layout.token_set(&sets::theme(&theme.name)),
                Value::Object(tree),
            );
        }

        documents.insert(
            self.layout.token_set(sets::SEMANTIC_COLOR),
            Value::Object(builders::semantic_color(self.config)),
        );

        let main = &self.config.main_color;
        documents.insert(
            self.layout.token_set(&sets::main_color(main)),
            Value::Object(builders::mode_block("main", main)),
        );
        for family in &self.config.support_colors {
            documents.insert(
                self.layout.token_set(&sets::support_color(family)),
                Value::Object(builders::mode_block("support", family)),
            );
        }

        Ok(documents)
    }
}

// ABOUTME: Token-set manifest and theme registry rewrites
// ABOUTME: Replaces the owned registry groups and leaves every other entry untouched

use indexmap::IndexMap;
use serde_json::Value;
use tokenweave_types::{
    ColorMode, PipelineConfig, RegistryEntry, ThemeEntry, ThemeGroup, TokenSetStatus, TokenTree,
};

use crate::ids::IdGenerator;
use crate::layout::sets;

/// Replace `tokenSetOrder`, keeping every other manifest field.
pub fn rewrite_metadata(mut metadata: TokenTree, order: &[String]) -> TokenTree {
    let order = order.iter().cloned().map(Value::String).collect();
    metadata.insert("tokenSetOrder".to_string(), Value::Array(order));
    metadata
}

/// Drop entries of the owned groups and append freshly generated ones.
///
/// Every other entry is written back exactly as read, key order included.
pub fn rebuild_registry(
    entries: Vec<Value>,
    config: &PipelineConfig,
    ids: &mut dyn IdGenerator,
) -> Vec<RegistryEntry> {
    entries
        .into_iter()
        .filter(|entry| ThemeGroup::of_entry(entry).is_none())
        .map(RegistryEntry::Kept)
        .chain(
            owned_entries(config, ids)
                .into_iter()
                .map(RegistryEntry::Generated),
        )
        .collect()
}

/// Entries for the color scheme, theme, semantic, main and support groups
pub fn owned_entries(config: &PipelineConfig, ids: &mut dyn IdGenerator) -> Vec<ThemeEntry> {
    let mut entries = Vec::new();
    let mut push = |name: String, group: ThemeGroup, token_sets: &[(&str, TokenSetStatus)]| {
        let selected: IndexMap<String, TokenSetStatus> = token_sets
            .iter()
            .map(|(set, status)| (set.to_string(), *status))
            .collect();
        entries.push(ThemeEntry::new(ids.next_id(), name, group, selected));
    };

    // Light/HI, Dark/HI, Light/Mareano, Dark/Mareano
    for theme in &config.themes {
        for mode in ColorMode::ALL {
            let set = sets::color_scheme(mode, &theme.name);
            push(
                format!("{}/{}", mode.label(), theme.name),
                ThemeGroup::ColorScheme,
                &[(set.as_str(), TokenSetStatus::Enabled)],
            );
        }
    }

    for theme in &config.themes {
        let set = sets::theme(&theme.name);
        push(
            theme.name.clone(),
            ThemeGroup::Theme,
            &[(set.as_str(), TokenSetStatus::Enabled)],
        );
    }

    push(
        "Semantic".to_string(),
        ThemeGroup::Semantic,
        &[
            (sets::SEMANTIC_STYLE, TokenSetStatus::Enabled),
            (sets::SEMANTIC_COLOR, TokenSetStatus::Enabled),
            (sets::GLOBALS, TokenSetStatus::Source),
        ],
    );

    let main = sets::main_color(&config.main_color);
    push(
        config.main_color.clone(),
        ThemeGroup::MainColor,
        &[(main.as_str(), TokenSetStatus::Enabled)],
    );

    for family in &config.support_colors {
        let set = sets::support_color(family);
        push(
            family.clone(),
            ThemeGroup::SupportColor,
            &[(set.as_str(), TokenSetStatus::Enabled)],
        );
    }

    entries
}

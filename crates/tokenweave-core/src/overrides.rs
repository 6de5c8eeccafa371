// ABOUTME: Override differencer comparing generated color families with the legacy sources
// ABOUTME: Emits the consolidated build configuration with per-theme, per-role overrides

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokenweave_logging::{debug, info, instrument, warn};
use tokenweave_types::token::{leaf_value, lookup_group};
use tokenweave_types::{ColorMode, FamilyBinding, PipelineConfig, Shade, ThemeConfig, TokenTree};

use crate::error::{Result, TokenError};
use crate::fs::{read_tree, write_json};
use crate::layout::{ProjectLayout, sets};
use crate::restructure::LegacyColorSchemes;

/// Legacy values to restore for one semantic role; a side that already
/// matches is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
}

impl OverrideEntry {
    pub fn is_empty(&self) -> bool {
        self.light.is_none() && self.dark.is_none()
    }
}

/// Family name -> semantic role name -> override
pub type OverrideTable = IndexMap<String, IndexMap<String, OverrideEntry>>;

/// The consolidated build configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "outDir")]
    pub out_dir: String,
    pub themes: IndexMap<String, ThemeBuild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeBuild {
    pub colors: ThemeColors,
    pub overrides: ThemeOverrides,
    pub border_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub main: IndexMap<String, String>,
    pub support: IndexMap<String, String>,
    pub neutral: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    pub severity: IndexMap<String, String>,
    pub colors: OverrideTable,
}

/// A family that could not be compared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMapping {
    pub theme: String,
    pub family: String,
    pub source: String,
}

/// Generated color-scheme families for one theme, per mode
#[derive(Debug, Clone)]
pub struct GeneratedSchemes {
    pub light: TokenTree,
    pub dark: TokenTree,
}

impl GeneratedSchemes {
    /// Read the generated primitives of a theme.
    ///
    /// Families live under the `theme` root; a root named after the theme is
    /// accepted as well.
    pub fn load(layout: &ProjectLayout, theme: &str) -> Result<Self> {
        let load = |mode: ColorMode| -> Result<TokenTree> {
            let path = layout.token_set(&sets::color_scheme(mode, theme));
            let mut tree = read_tree(&path)?;
            ["theme", theme]
                .into_iter()
                .find_map(|root| match tree.remove(root) {
                    Some(serde_json::Value::Object(families)) => Some(families),
                    _ => None,
                })
                .ok_or_else(|| TokenError::missing_token(&path, "theme"))
        };
        Ok(Self {
            light: load(ColorMode::Light)?,
            dark: load(ColorMode::Dark)?,
        })
    }
}

/// Per-theme outcome of a differencer run
#[derive(Debug, Clone, Default)]
pub struct ThemeSummary {
    pub theme: String,
    /// Number of overridden roles per family, in table order
    pub counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Default)]
pub struct OverrideReport {
    pub path: PathBuf,
    pub themes: Vec<ThemeSummary>,
    pub missing: Vec<MissingMapping>,
}

/// Lowercased string `$value` of one shade
fn shade_value(family: &TokenTree, shade: Shade) -> Option<&str> {
    family
        .get(&shade.key())
        .and_then(leaf_value)
        .and_then(serde_json::Value::as_str)
}

fn normalized(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

/// Compare one family across both modes.
///
/// Returns overrides keyed by semantic role name, in shade order.
pub fn diff_family(
    generated_light: &TokenTree,
    generated_dark: &TokenTree,
    legacy_light: &TokenTree,
    legacy_dark: &TokenTree,
) -> IndexMap<String, OverrideEntry> {
    let mut overrides = IndexMap::new();

    for shade in Shade::all() {
        let gen_light = shade_value(generated_light, shade);
        let gen_dark = shade_value(generated_dark, shade);
        let src_light = shade_value(legacy_light, shade);
        let src_dark = shade_value(legacy_dark, shade);

        let light_differs = normalized(gen_light) != normalized(src_light);
        let dark_differs = normalized(gen_dark) != normalized(src_dark);
        if !light_differs && !dark_differs {
            continue;
        }

        let entry = OverrideEntry {
            light: src_light.filter(|_| light_differs).map(str::to_string),
            dark: src_dark.filter(|_| dark_differs).map(str::to_string),
        };
        if entry.is_empty() {
            // only the generated side has a value; nothing to restore
            warn!(shade = %shade, "Legacy shade missing, no override recorded");
            continue;
        }
        overrides.insert(shade.role().as_str().to_string(), entry);
    }

    overrides
}

/// Compute the override table for one theme.
///
/// Families missing on either side are reported and skipped entirely.
pub fn theme_overrides(
    theme: &ThemeConfig,
    shared: &[FamilyBinding],
    generated: &GeneratedSchemes,
    legacy: &LegacyColorSchemes,
) -> (OverrideTable, Vec<MissingMapping>) {
    let mut table = OverrideTable::new();
    let mut missing = Vec::new();

    for FamilyBinding { name, source } in theme.bindings_with(shared) {
        let sides = (
            lookup_group(&legacy.light, source),
            lookup_group(&legacy.dark, source),
            generated.light.get(name).and_then(serde_json::Value::as_object),
            generated.dark.get(name).and_then(serde_json::Value::as_object),
        );
        let (Some(src_light), Some(src_dark), Some(gen_light), Some(gen_dark)) = sides else {
            warn!(theme = %theme.name, family = %name, source = %source, "MISSING mapping");
            missing.push(MissingMapping {
                theme: theme.name.clone(),
                family: name.clone(),
                source: source.to_string(),
            });
            continue;
        };

        let overrides = diff_family(gen_light, gen_dark, src_light, src_dark);
        debug!(theme = %theme.name, family = %name, count = overrides.len(), "Compared family");
        if !overrides.is_empty() {
            table.insert(name.clone(), overrides);
        }
    }

    (table, missing)
}

/// Assemble the build configuration block of one theme
pub fn theme_build(config: &PipelineConfig, theme: &ThemeConfig, colors: OverrideTable) -> ThemeBuild {
    ThemeBuild {
        colors: ThemeColors {
            main: theme.seeds.main.clone(),
            support: theme.seeds.support.clone(),
            neutral: theme.seeds.neutral.clone(),
        },
        overrides: ThemeOverrides {
            severity: config.severity.clone(),
            colors,
        },
        border_radius: theme.border_radius,
    }
}

pub struct OverrideDifferencer<'a> {
    config: &'a PipelineConfig,
    layout: &'a ProjectLayout,
}

impl<'a> OverrideDifferencer<'a> {
    pub fn new(config: &'a PipelineConfig, layout: &'a ProjectLayout) -> Self {
        Self { config, layout }
    }

    /// Build the configuration document without writing it
    pub fn build(&self) -> Result<(BuildConfig, OverrideReport)> {
        let legacy = LegacyColorSchemes::load(self.layout)?;
        let mut report = OverrideReport {
            path: self.layout.build_config(),
            ..Default::default()
        };
        let mut themes = IndexMap::new();

        for theme in &self.config.themes {
            let generated = GeneratedSchemes::load(self.layout, &theme.name)?;
            let (table, missing) =
                theme_overrides(theme, &self.config.shared_families, &generated, &legacy);

            report.themes.push(ThemeSummary {
                theme: theme.name.clone(),
                counts: table
                    .iter()
                    .map(|(family, roles)| (family.clone(), roles.len()))
                    .collect(),
            });
            report.missing.extend(missing);
            themes.insert(theme.name.clone(), theme_build(self.config, theme, table));
        }

        let document = BuildConfig {
            schema: self.config.schema.clone(),
            out_dir: self.config.out_dir.clone(),
            themes,
        };
        Ok((document, report))
    }

    /// Compute overrides for every theme and write the configuration file
    #[instrument(skip_all, fields(root = %self.layout.root().display()))]
    pub fn run(&self) -> Result<OverrideReport> {
        let (document, report) = self.build()?;
        write_json(&report.path, &document)?;

        info!(
            path = %report.path.display(),
            missing = report.missing.len(),
            "Build configuration written"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn family_with(overrides: &[(u8, &str)], base: &str) -> TokenTree {
        Shade::all()
            .map(|s| {
                let value = overrides
                    .iter()
                    .find(|(index, _)| *index == s.index())
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_else(|| format!("{base}{:02}", s.index()));
                (s.key(), json!({"$type": "color", "$value": value}))
            })
            .collect()
    }

    #[test]
    fn test_case_insensitive_equality_creates_no_override() {
        let legacy = family_with(&[(12, "#abc123")], "#aa");
        let generated = family_with(&[(12, "#ABC123")], "#AA");

        let overrides = diff_family(&generated, &generated, &legacy, &legacy);
        assert!(overrides.is_empty(), "{overrides:?}");
    }

    #[test]
    fn test_dark_only_difference() {
        let legacy = family_with(&[], "#aa");
        let generated_dark = family_with(&[(7, "#000000")], "#aa");

        let overrides = diff_family(&legacy, &generated_dark, &legacy, &legacy);
        assert_eq!(overrides.len(), 1);
        let entry = &overrides["border-subtle"];
        assert_eq!(entry.light, None);
        assert_eq!(entry.dark.as_deref(), Some("#aa07"));

        let serialized = serde_json::to_value(entry).unwrap();
        assert_eq!(serialized, json!({"dark": "#aa07"}));
    }

    #[test]
    fn test_both_sides_differ_keyed_by_role() {
        let legacy_light = family_with(&[], "#11");
        let legacy_dark = family_with(&[], "#22");
        let generated_light = family_with(&[(1, "#ffffff")], "#11");
        let generated_dark = family_with(&[(1, "#000000"), (16, "#000000")], "#22");

        let overrides = diff_family(&generated_light, &generated_dark, &legacy_light, &legacy_dark);
        let roles: Vec<_> = overrides.keys().map(String::as_str).collect();
        assert_eq!(roles, vec!["background-default", "base-contrast-default"]);
        assert_eq!(
            overrides["background-default"],
            OverrideEntry {
                light: Some("#1101".to_string()),
                dark: Some("#2201".to_string()),
            }
        );
        assert_eq!(overrides["base-contrast-default"].light, None);
    }

    fn legacy_schemes(drop_brand3: bool) -> LegacyColorSchemes {
        let tree = |base: &str| -> TokenTree {
            let mut hi = serde_json::Map::new();
            for name in ["primary", "secondary", "tertiary", "brand3", "neutral"] {
                if drop_brand3 && name == "brand3" {
                    continue;
                }
                hi.insert(name.to_string(), Value::Object(family_with(&[], base)));
            }
            let mut globe = serde_json::Map::new();
            for name in ["info", "success", "warning", "erroe"] {
                globe.insert(name.to_string(), Value::Object(family_with(&[], base)));
            }
            let mut root = serde_json::Map::new();
            root.insert("HI".to_string(), Value::Object(hi));
            root.insert("globe".to_string(), Value::Object(globe));
            root
        };
        LegacyColorSchemes {
            light: tree("#10"),
            dark: tree("#20"),
        }
    }

    fn generated_schemes() -> GeneratedSchemes {
        let tree = |base: &str| -> TokenTree {
            [
                "accent", "brand1", "brand2", "brand3", "neutral", "info", "success", "warning",
                "danger",
            ]
            .into_iter()
            .map(|name| (name.to_string(), Value::Object(family_with(&[], base))))
            .collect()
        };
        GeneratedSchemes {
            light: tree("#10"),
            dark: tree("#20"),
        }
    }

    #[test]
    fn test_missing_legacy_family_is_skipped_and_reported() {
        let config = PipelineConfig::default();
        let hi = config.theme("HI").unwrap();
        let mut generated = generated_schemes();
        generated.light["brand1"] = Value::Object(family_with(&[(3, "#ffffff")], "#10"));
        generated.light["brand3"] = Value::Object(family_with(&[(3, "#ffffff")], "#10"));

        let (table, missing) =
            theme_overrides(hi, &config.shared_families, &generated, &legacy_schemes(true));

        assert_eq!(
            missing,
            vec![MissingMapping {
                theme: "HI".to_string(),
                family: "brand3".to_string(),
                source: "HI.brand3".to_string(),
            }]
        );
        assert!(!table.contains_key("brand3"));
        assert_eq!(
            table["brand1"]["surface-default"],
            OverrideEntry {
                light: Some("#1003".to_string()),
                dark: None,
            }
        );
    }

    #[test]
    fn test_theme_build_document_shape() {
        let config = PipelineConfig::default();
        let mareano = config.theme("Mareano").unwrap();
        let build = theme_build(&config, mareano, OverrideTable::new());

        assert_eq!(
            serde_json::to_value(&build).unwrap(),
            json!({
                "colors": {
                    "main": { "accent": "#bed45d" },
                    "support": { "brand1": "#084d5c", "brand2": "#30b0d5", "brand3": "#eadbc8" },
                    "neutral": "#000000cc"
                },
                "overrides": {
                    "severity": {
                        "info": "#03a9f4",
                        "success": "#7cb342",
                        "warning": "#fb8c00",
                        "danger": "#f44336"
                    },
                    "colors": {}
                },
                "borderRadius": 9999
            })
        );
    }
}

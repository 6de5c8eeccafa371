// ABOUTME: Pipeline configuration tables
// ABOUTME: Paths, theme mappings, seed colors and CSS rules with defaults matching the shipped token sources

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::roles::{SemanticRole, Shade};
use crate::token::TokenPath;

/// Complete configuration for all three pipeline stages.
///
/// `Default` reproduces the fixed tables of the token migration; a
/// `tokenweave.toml` may replace any section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PipelineConfig {
    pub paths: PathConfig,
    pub themes: Vec<ThemeConfig>,
    /// Severity families shared verbatim by every theme
    pub shared_families: Vec<FamilyBinding>,
    /// Family order used in theme files and the semantic layer
    pub family_order: Vec<String>,
    pub link_visited: ShadeSource,
    pub focus: FocusConfig,
    /// Family aliased by the main-color mode
    pub main_color: String,
    /// Families aliased by the support-color modes
    pub support_colors: Vec<String>,
    /// Top-level keys copied from legacy theme files when present
    pub passthrough_keys: Vec<String>,
    pub token_set_order: Vec<String>,
    pub severity: IndexMap<String, String>,
    pub schema: String,
    pub out_dir: String,
    pub css: CssConfig,
}

/// Locations of inputs and outputs, relative to the project root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathConfig {
    pub legacy_dir: String,
    pub legacy_color_scheme_dir: String,
    pub legacy_light: String,
    pub legacy_dark: String,
    pub legacy_themes_dir: String,
    pub output_dir: String,
    pub config_file: String,
    pub css_build_dir: String,
}

/// One target theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThemeConfig {
    pub name: String,
    /// Canonical family name to legacy family path, in output order
    pub families: Vec<FamilyBinding>,
    pub seeds: SeedColors,
    pub border_radius: u32,
}

/// Binds a canonical family name to the legacy family it is read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyBinding {
    pub name: String,
    pub source: TokenPath,
}

impl FamilyBinding {
    pub fn new(name: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            source: TokenPath::new(source),
        }
    }
}

/// Literal brand seed colors for the build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedColors {
    pub main: IndexMap<String, String>,
    pub support: IndexMap<String, String>,
    pub neutral: String,
}

/// A single shade of a legacy family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadeSource {
    pub family: TokenPath,
    pub shade: Shade,
}

/// Focus ring colors taken from a generated family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusConfig {
    pub family: String,
    pub inner: Shade,
    pub outer: Shade,
}

/// CSS variable remapping rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CssConfig {
    /// Custom-property prefix without leading dashes
    pub prefix: String,
    pub skip_patterns: Vec<String>,
    pub skip_exact: Vec<String>,
    /// Default input, relative to the CSS build directory
    pub input: String,
    /// Prefix of generated file names
    pub output_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: PathConfig::default(),
            themes: vec![hi_theme(), mareano_theme()],
            shared_families: vec![
                FamilyBinding::new("info", "globe.info"),
                FamilyBinding::new("success", "globe.success"),
                FamilyBinding::new("warning", "globe.warning"),
                // legacy name is misspelled
                FamilyBinding::new("danger", "globe.erroe"),
            ],
            family_order: strings(&["accent", "neutral", "brand1", "brand2", "brand3"]),
            link_visited: ShadeSource {
                family: TokenPath::new("globe.purple"),
                shade: SemanticRole::BaseDefault.shade(),
            },
            focus: FocusConfig {
                family: "neutral".to_string(),
                inner: SemanticRole::BackgroundDefault.shade(),
                outer: SemanticRole::TextDefault.shade(),
            },
            main_color: "accent".to_string(),
            support_colors: strings(&["brand1", "brand2", "brand3"]),
            passthrough_keys: strings(&["font-family", "font-weight", "border-radius"]),
            token_set_order: default_token_set_order(),
            severity: pairs(&[
                ("info", "#03a9f4"),
                ("success", "#7cb342"),
                ("warning", "#fb8c00"),
                ("danger", "#f44336"),
            ]),
            schema: "node_modules/@digdir/designsystemet/dist/config.schema.json".to_string(),
            out_dir: "./design-tokens".to_string(),
            css: CssConfig::default(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            legacy_dir: "design-tokens-existing".to_string(),
            legacy_color_scheme_dir: "Color scheme (test)".to_string(),
            legacy_light: "Light.json".to_string(),
            legacy_dark: "Dark.json".to_string(),
            legacy_themes_dir: "themes".to_string(),
            output_dir: "design-tokens".to_string(),
            config_file: "designsystemet-existing.config.json".to_string(),
            css_build_dir: "design-tokens-build".to_string(),
        }
    }
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            prefix: "ds".to_string(),
            skip_patterns: strings(&[
                "^size-base$",
                "^size-step$",
                "^size-unit$",
                "^size-mode-font-size",
                "^size--",
                "^border-radius-base$",
                "^border-radius-scale$",
                "^heading-",
                "^body-",
                "^body-short-",
                "^body-long-",
            ]),
            skip_exact: strings(&["_ds-font-size-factor"]),
            input: "theme.css".to_string(),
            output_prefix: "tailwind-".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Every family name that gets a theme and semantic block, theme-specific first
    pub fn all_families(&self) -> Vec<String> {
        self.family_order
            .iter()
            .cloned()
            .chain(self.shared_families.iter().map(|f| f.name.clone()))
            .collect()
    }

    pub fn theme(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.iter().find(|theme| theme.name == name)
    }
}

impl ThemeConfig {
    /// Theme-specific bindings followed by the shared severity bindings
    pub fn bindings_with<'a>(
        &'a self,
        shared: &'a [FamilyBinding],
    ) -> impl Iterator<Item = &'a FamilyBinding> {
        self.families.iter().chain(shared.iter())
    }
}

fn hi_theme() -> ThemeConfig {
    ThemeConfig {
        name: "HI".to_string(),
        families: vec![
            FamilyBinding::new("accent", "HI.primary"),
            FamilyBinding::new("brand1", "HI.secondary"),
            FamilyBinding::new("brand2", "HI.tertiary"),
            FamilyBinding::new("brand3", "HI.brand3"),
            FamilyBinding::new("neutral", "HI.neutral"),
        ],
        seeds: SeedColors {
            main: pairs(&[("accent", "#003366")]),
            support: pairs(&[
                ("brand1", "#33cccc"),
                ("brand2", "#9e0099"),
                ("brand3", "#1e98f5"),
            ]),
            neutral: "#000000cc".to_string(),
        },
        border_radius: 4,
    }
}

fn mareano_theme() -> ThemeConfig {
    ThemeConfig {
        name: "Mareano".to_string(),
        families: vec![
            FamilyBinding::new("accent", "External.Mareano primary"),
            FamilyBinding::new("brand1", "External.Mareano secondary"),
            // legacy name is misspelled
            FamilyBinding::new("brand2", "External.Mareano teriary"),
            FamilyBinding::new("brand3", "External.brand3"),
            FamilyBinding::new("neutral", "External.neutral"),
        ],
        seeds: SeedColors {
            main: pairs(&[("accent", "#bed45d")]),
            support: pairs(&[
                ("brand1", "#084d5c"),
                ("brand2", "#30b0d5"),
                ("brand3", "#eadbc8"),
            ]),
            neutral: "#000000cc".to_string(),
        },
        border_radius: 9999,
    }
}

fn default_token_set_order() -> Vec<String> {
    strings(&[
        "primitives/globals",
        "primitives/modes/size/small",
        "primitives/modes/size/medium",
        "primitives/modes/size/large",
        "primitives/modes/size/global",
        "primitives/modes/typography/size/small",
        "primitives/modes/typography/size/medium",
        "primitives/modes/typography/size/large",
        "primitives/modes/typography/primary/theme",
        "primitives/modes/typography/secondary/theme",
        "primitives/modes/color-scheme/light/HI",
        "primitives/modes/color-scheme/light/Mareano",
        "primitives/modes/color-scheme/dark/HI",
        "primitives/modes/color-scheme/dark/Mareano",
        "themes/HI",
        "themes/Mareano",
        "semantic/color",
        "semantic/modes/main-color/accent",
        "semantic/modes/support-color/brand1",
        "semantic/modes/support-color/brand2",
        "semantic/modes/support-color/brand3",
        "semantic/style",
    ])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> IndexMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ABOUTME: CSS variable remapper re-exporting compiled design-system variables under utility names
// ABOUTME: Extracts prefixed custom properties, drops internals, classifies and renders an @theme block

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use regex::Regex;
use tokenweave_logging::{debug, info, instrument};
use tokenweave_types::CssConfig;

use crate::error::{Result, TokenError};
use crate::fs::{read_text, write_text};
use crate::layout::ProjectLayout;

/// Output bucket of a re-exported variable, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssCategory {
    Colors,
    Spacing,
    FontSize,
    Shadows,
    BorderRadius,
    FontWeight,
    FontFamily,
    LineHeight,
    LetterSpacing,
    BorderWidth,
    Opacity,
}

impl CssCategory {
    pub const ALL: [CssCategory; 11] = [
        CssCategory::Colors,
        CssCategory::Spacing,
        CssCategory::FontSize,
        CssCategory::Shadows,
        CssCategory::BorderRadius,
        CssCategory::FontWeight,
        CssCategory::FontFamily,
        CssCategory::LineHeight,
        CssCategory::LetterSpacing,
        CssCategory::BorderWidth,
        CssCategory::Opacity,
    ];

    /// Heading comment emitted above the group
    pub fn comment(self) -> &'static str {
        match self {
            CssCategory::Colors => "Colors",
            CssCategory::Spacing => "Spacing",
            CssCategory::FontSize => "Font Size",
            CssCategory::Shadows => "Shadows",
            CssCategory::BorderRadius => "Border Radius",
            CssCategory::FontWeight => "Font Weight",
            CssCategory::FontFamily => "Font Family",
            CssCategory::LineHeight => "Line Height",
            CssCategory::LetterSpacing => "Letter Spacing",
            CssCategory::BorderWidth => "Border Width",
            CssCategory::Opacity => "Opacity",
        }
    }

    /// Classify an unprefixed variable name, returning its category and
    /// target property (with leading dashes). First match wins.
    pub fn classify(name: &str) -> Option<(CssCategory, String)> {
        if name == "link-color-visited" {
            return Some((CssCategory::Colors, "--color-link-visited".to_string()));
        }
        if name == "font-family" {
            return Some((CssCategory::FontFamily, "--font-family-default".to_string()));
        }

        let renamed = |category, from: &str, to: &str| {
            name.strip_prefix(from)
                .map(|suffix| (category, format!("--{to}{suffix}")))
        };

        renamed(CssCategory::Colors, "color-", "color-")
            .or_else(|| renamed(CssCategory::Spacing, "size-", "spacing-"))
            .or_else(|| renamed(CssCategory::FontSize, "font-size-", "font-size-"))
            .or_else(|| renamed(CssCategory::Shadows, "shadow-", "shadow-"))
            .or_else(|| renamed(CssCategory::BorderRadius, "border-radius-", "radius-"))
            .or_else(|| renamed(CssCategory::FontWeight, "font-weight-", "font-weight-"))
            .or_else(|| renamed(CssCategory::LineHeight, "line-height-", "line-height-"))
            .or_else(|| renamed(CssCategory::LetterSpacing, "letter-spacing-", "letter-spacing-"))
            .or_else(|| renamed(CssCategory::BorderWidth, "border-width-", "border-width-"))
            .or_else(|| renamed(CssCategory::Opacity, "opacity-", "opacity-"))
    }
}

impl fmt::Display for CssCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.comment())
    }
}

/// A classified variable ready for re-export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRecord {
    /// Declared property, e.g. `--ds-color-accent-1`
    pub source: String,
    pub category: CssCategory,
    /// Re-exported property, e.g. `--color-accent-1`
    pub target: String,
}

/// Names that are never re-exported
#[derive(Debug, Clone)]
pub struct SkipRules {
    patterns: Vec<Regex>,
    exact: HashSet<String>,
}

impl SkipRules {
    pub fn compile(config: &CssConfig) -> Result<Self> {
        let patterns = config
            .skip_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| TokenError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            exact: config.skip_exact.iter().cloned().collect(),
        })
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.exact.contains(name) || self.patterns.iter().any(|p| p.is_match(name))
    }
}

/// How inputs map to output files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanOut {
    /// Every input feeds one output; variables are unioned in first-seen order
    Aggregate { output: PathBuf },
    /// Each `<stem>.css` gets a sibling `<output-prefix><stem>.css`
    PerFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapOutput {
    pub path: PathBuf,
    pub sources: Vec<PathBuf>,
    pub variables: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RemapReport {
    pub outputs: Vec<RemapOutput>,
}

pub struct Remapper<'a> {
    config: &'a CssConfig,
    layout: &'a ProjectLayout,
    declaration: Regex,
    skip: SkipRules,
}

impl<'a> Remapper<'a> {
    pub fn new(config: &'a CssConfig, layout: &'a ProjectLayout) -> Result<Self> {
        let pattern = format!(r"--{}-([\w-]+)\s*:", regex::escape(&config.prefix));
        let declaration = Regex::new(&pattern)
            .map_err(|source| TokenError::InvalidPattern { pattern, source })?;

        Ok(Self {
            config,
            layout,
            declaration,
            skip: SkipRules::compile(config)?,
        })
    }

    pub fn default_input(&self) -> PathBuf {
        self.layout.css_build_dir().join(&self.config.input)
    }

    pub fn default_output(&self) -> PathBuf {
        self.output_for(&self.default_input())
    }

    /// Sibling output path for an input file
    pub fn output_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{}{stem}.css", self.config.output_prefix))
    }

    /// Distinct declared names without the prefix, in first-seen order
    pub fn extract_names(&self, css: &str) -> IndexSet<String> {
        self.declaration
            .captures_iter(css)
            .filter_map(|caps| caps.get(1))
            .map(|name| name.as_str().to_string())
            .collect()
    }

    /// Drop skipped and unclassified names, keeping scan order
    pub fn records<'n>(&self, names: impl IntoIterator<Item = &'n String>) -> Vec<VariableRecord> {
        names
            .into_iter()
            .filter(|name| !self.skip.is_skipped(name))
            .filter_map(|name| {
                let (category, target) = CssCategory::classify(name)?;
                Some(VariableRecord {
                    source: format!("--{}-{name}", self.config.prefix),
                    category,
                    target,
                })
            })
            .collect()
    }

    /// Render the `@theme` block for a set of records
    pub fn render(&self, sources: &[String], records: &[VariableRecord]) -> String {
        let mut out = String::new();
        out.push_str(&format!("/* Generated from {} */\n", sources.join(", ")));
        out.push('\n');
        out.push_str("@theme {\n");

        let mut first = true;
        for category in CssCategory::ALL {
            let mut entries = records.iter().filter(|r| r.category == category).peekable();
            if entries.peek().is_none() {
                continue;
            }
            if !first {
                out.push('\n');
            }
            first = false;

            out.push_str(&format!("  /* {category} */\n"));
            for record in entries {
                out.push_str(&format!("  {}: var({});\n", record.target, record.source));
            }
        }

        out.push_str("}\n");
        out
    }

    /// Display form of an input in the generated header
    fn source_label(&self, input: &Path) -> String {
        input
            .strip_prefix(self.layout.root())
            .unwrap_or(input)
            .display()
            .to_string()
    }

    /// Read every input, then write the outputs chosen by the fan-out strategy
    #[instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn run(&self, inputs: &[PathBuf], fan_out: &FanOut) -> Result<RemapReport> {
        let mut scanned = Vec::with_capacity(inputs.len());
        for input in inputs {
            let names = self.extract_names(&read_text(input)?);
            debug!(path = %input.display(), names = names.len(), "Scanned CSS variables");
            scanned.push((input, names));
        }

        let mut pending = Vec::new();
        match fan_out {
            FanOut::Aggregate { output } => {
                let mut union = IndexSet::new();
                for (_, names) in &scanned {
                    union.extend(names.iter().cloned());
                }
                pending.push((
                    output.clone(),
                    inputs.to_vec(),
                    self.records(&union),
                ));
            }
            FanOut::PerFile => {
                for (input, names) in &scanned {
                    pending.push((self.output_for(input), vec![input.to_path_buf()], self.records(names)));
                }
            }
        }

        let mut report = RemapReport::default();
        for (path, sources, records) in pending {
            let labels: Vec<String> = sources.iter().map(|s| self.source_label(s)).collect();
            write_text(&path, &self.render(&labels, &records))?;
            info!(path = %path.display(), variables = records.len(), "Wrote theme variables");
            report.outputs.push(RemapOutput {
                path,
                sources,
                variables: records.len(),
            });
        }
        Ok(report)
    }
}

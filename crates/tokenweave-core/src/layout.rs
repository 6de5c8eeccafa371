// ABOUTME: Resolves every input and output location of the pipeline under a project root
// ABOUTME: Also provides the token-set names that appear in the manifest and registry

use std::path::{Path, PathBuf};

use tokenweave_types::{ColorMode, PathConfig};

/// File layout of a token project
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    paths: PathConfig,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, paths: PathConfig) -> Self {
        Self {
            root: root.into(),
            paths,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn legacy_dir(&self) -> PathBuf {
        self.root.join(&self.paths.legacy_dir)
    }

    fn output_dir(&self) -> PathBuf {
        self.root.join(&self.paths.output_dir)
    }

    /// Legacy color-scheme file for a mode
    pub fn legacy_color_scheme(&self, mode: ColorMode) -> PathBuf {
        let file = match mode {
            ColorMode::Light => &self.paths.legacy_light,
            ColorMode::Dark => &self.paths.legacy_dark,
        };
        self.legacy_dir()
            .join(&self.paths.legacy_color_scheme_dir)
            .join(file)
    }

    pub fn legacy_theme(&self, theme: &str) -> PathBuf {
        self.legacy_dir()
            .join(&self.paths.legacy_themes_dir)
            .join(format!("{theme}.json"))
    }

    /// Generated file for a token set name such as `themes/HI`
    pub fn token_set(&self, set: &str) -> PathBuf {
        self.output_dir().join(format!("{set}.json"))
    }

    pub fn metadata(&self) -> PathBuf {
        self.output_dir().join("$metadata.json")
    }

    pub fn registry(&self) -> PathBuf {
        self.output_dir().join("$themes.json")
    }

    pub fn build_config(&self) -> PathBuf {
        self.root.join(&self.paths.config_file)
    }

    pub fn css_build_dir(&self) -> PathBuf {
        self.root.join(&self.paths.css_build_dir)
    }
}

/// Token set names, shared by file paths, the manifest and the registry
pub mod sets {
    use tokenweave_types::ColorMode;

    pub const GLOBALS: &str = "primitives/globals";
    pub const SEMANTIC_COLOR: &str = "semantic/color";
    pub const SEMANTIC_STYLE: &str = "semantic/style";

    pub fn color_scheme(mode: ColorMode, theme: &str) -> String {
        format!("primitives/modes/color-scheme/{mode}/{theme}")
    }

    pub fn theme(theme: &str) -> String {
        format!("themes/{theme}")
    }

    pub fn main_color(family: &str) -> String {
        format!("semantic/modes/main-color/{family}")
    }

    pub fn support_color(family: &str) -> String {
        format!("semantic/modes/support-color/{family}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = ProjectLayout::new("/proj", PathConfig::default());

        assert_eq!(
            layout.legacy_color_scheme(ColorMode::Dark),
            Path::new("/proj/design-tokens-existing/Color scheme (test)/Dark.json")
        );
        assert_eq!(
            layout.legacy_theme("Mareano"),
            Path::new("/proj/design-tokens-existing/themes/Mareano.json")
        );
        assert_eq!(
            layout.token_set(&sets::color_scheme(ColorMode::Light, "HI")),
            Path::new("/proj/design-tokens/primitives/modes/color-scheme/light/HI.json")
        );
        assert_eq!(
            layout.token_set(&sets::support_color("brand2")),
            Path::new("/proj/design-tokens/semantic/modes/support-color/brand2.json")
        );
        assert_eq!(
            layout.registry(),
            Path::new("/proj/design-tokens/$themes.json")
        );
        assert_eq!(
            layout.build_config(),
            Path::new("/proj/designsystemet-existing.config.json")
        );
    }
}

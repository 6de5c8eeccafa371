// ABOUTME: End-to-end tests running the pipeline stages against an on-disk project
// ABOUTME: Covers restructure reruns, override detection and failure without partial output

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tokenweave_types::{ColorMode, PipelineConfig, Shade};

    use crate::fs::{read_tree, write_json};
    use crate::layout::{ProjectLayout, sets};
    use crate::{
        BuildConfig, OverrideDifferencer, OverrideEntry, Restructurer, SequentialIds, TokenError,
    };

    fn family(prefix: &str) -> Value {
        let shades: serde_json::Map<String, Value> = Shade::all()
            .map(|s| {
                (
                    s.key(),
                    json!({"$type": "color", "$value": format!("{prefix}{:04x}", s.index())}),
                )
            })
            .collect();
        Value::Object(shades)
    }

    fn legacy_scheme(mode: &str) -> Value {
        json!({
            "HI": {
                "primary": family(&format!("#{mode}a")),
                "secondary": family(&format!("#{mode}b")),
                "tertiary": family(&format!("#{mode}c")),
                "brand3": family(&format!("#{mode}d")),
                "neutral": family(&format!("#{mode}e"))
            },
            "External": {
                "Mareano primary": family(&format!("#{mode}1")),
                "Mareano secondary": family(&format!("#{mode}2")),
                "Mareano teriary": family(&format!("#{mode}3")),
                "brand3": family(&format!("#{mode}4")),
                "neutral": family(&format!("#{mode}5"))
            },
            "globe": {
                "info": family(&format!("#{mode}6")),
                "success": family(&format!("#{mode}7")),
                "warning": family(&format!("#{mode}8")),
                "erroe": family(&format!("#{mode}9")),
                "purple": family(&format!("#{mode}0"))
            }
        })
    }

    struct Fixture {
        dir: TempDir,
        config: PipelineConfig,
        layout: ProjectLayout,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = PipelineConfig::default();
            let layout = ProjectLayout::new(dir.path(), config.paths.clone());

            write_json(&layout.legacy_color_scheme(ColorMode::Light), &legacy_scheme("a")).unwrap();
            write_json(&layout.legacy_color_scheme(ColorMode::Dark), &legacy_scheme("d")).unwrap();
            write_json(
                &layout.legacy_theme("HI"),
                &json!({ "font-family": { "$type": "fontFamilies", "$value": "Inter" } }),
            )
            .unwrap();
            write_json(&layout.legacy_theme("Mareano"), &json!({})).unwrap();
            write_json(
                &layout.metadata(),
                &json!({ "tokenSetOrder": ["stale"], "keep": true }),
            )
            .unwrap();
            write_json(
                &layout.registry(),
                &json!([
                    {
                        "id": "size-medium",
                        "name": "medium",
                        "$figmaCollectionId": "VariableCollectionId:1:2",
                        "selectedTokenSets": { "primitives/modes/size/medium": "enabled" },
                        "$figmaStyleReferences": {},
                        "group": "Size",
                        "$figmaModeId": "1:0"
                    },
                    {
                        "id": "stale-theme",
                        "name": "theme",
                        "selectedTokenSets": { "themes/theme": "enabled" },
                        "group": "Theme"
                    }
                ]),
            )
            .unwrap();

            Self {
                dir,
                config,
                layout,
            }
        }

        fn restructure(&self) -> crate::Result<crate::RestructureReport> {
            Restructurer::new(&self.config, &self.layout).run(&mut SequentialIds::new())
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }
    }

    #[test]
    fn test_restructure_writes_every_output() {
        let fixture = Fixture::new();
        let report = fixture.restructure().unwrap();

        // 4 color schemes, 2 themes, semantic color, main, 3 support, metadata, registry
        assert_eq!(report.written.len(), 13);
        assert_eq!(report.preserved_entries, 1);
        assert_eq!(report.generated_entries, 11);

        let light_hi = read_tree(
            &fixture
                .layout
                .token_set(&sets::color_scheme(ColorMode::Light, "HI")),
        )
        .unwrap();
        assert_eq!(light_hi["theme"]["accent"]["12"]["$value"], json!("#aa000c"));
        assert_eq!(light_hi["theme"]["danger"]["3"]["$value"], json!("#a90003"));

        let theme = read_tree(&fixture.layout.token_set(&sets::theme("HI"))).unwrap();
        assert_eq!(theme["font-family"]["$value"], json!("Inter"));
        let mareano = read_tree(&fixture.layout.token_set(&sets::theme("Mareano"))).unwrap();
        assert!(!mareano.contains_key("font-family"));

        let metadata = read_tree(&fixture.layout.metadata()).unwrap();
        assert_eq!(metadata["keep"], json!(true));
        assert_eq!(metadata["tokenSetOrder"].as_array().unwrap().len(), 22);

        let registry: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(fixture.layout.registry()).unwrap())
                .unwrap();
        let keys: Vec<_> = registry[0].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "name",
                "$figmaCollectionId",
                "selectedTokenSets",
                "$figmaStyleReferences",
                "group",
                "$figmaModeId"
            ]
        );
        assert!(registry.iter().all(|entry| entry["id"] != "stale-theme"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let fixture = Fixture::new();
        let first = fixture.restructure().unwrap();
        let snapshot: Vec<String> = first
            .written
            .iter()
            .map(|path| std::fs::read_to_string(path).unwrap())
            .collect();

        let second = fixture.restructure().unwrap();
        assert_eq!(first.written, second.written);
        for (path, before) in second.written.iter().zip(snapshot) {
            let after = std::fs::read_to_string(path).unwrap();
            assert_eq!(before, after, "{} changed on rerun", path.display());
            assert!(after.ends_with("}\n") || after.ends_with("]\n"));
        }
    }

    #[test]
    fn test_missing_legacy_family_writes_nothing() {
        let fixture = Fixture::new();
        let mut light = legacy_scheme("a");
        light["HI"].as_object_mut().unwrap().remove("brand3");
        write_json(&fixture.layout.legacy_color_scheme(ColorMode::Light), &light).unwrap();

        let err = fixture.restructure().unwrap_err();
        assert!(matches!(err, TokenError::MissingToken { ref token, .. } if token == "HI.brand3"));
        assert!(!fixture.path().join("design-tokens/themes").exists());
        assert!(!fixture.path().join("design-tokens/primitives").exists());
    }

    #[test]
    fn test_unchanged_generation_has_no_overrides() {
        let fixture = Fixture::new();
        fixture.restructure().unwrap();

        let report = OverrideDifferencer::new(&fixture.config, &fixture.layout)
            .run()
            .unwrap();
        assert!(report.missing.is_empty());
        assert!(report.themes.iter().all(|t| t.counts.is_empty()));

        let document: BuildConfig =
            serde_json::from_str(&std::fs::read_to_string(&report.path).unwrap()).unwrap();
        assert_eq!(document.out_dir, "./design-tokens");
        let themes: Vec<_> = document.themes.keys().map(String::as_str).collect();
        assert_eq!(themes, vec!["HI", "Mareano"]);
        assert_eq!(document.themes["HI"].border_radius, 4);
    }

    #[test]
    fn test_regenerated_values_produce_overrides() {
        let fixture = Fixture::new();
        fixture.restructure().unwrap();

        let light_path = fixture
            .layout
            .token_set(&sets::color_scheme(ColorMode::Light, "HI"));
        let dark_path = fixture
            .layout
            .token_set(&sets::color_scheme(ColorMode::Dark, "HI"));
        let mut light = read_tree(&light_path).unwrap();
        let mut dark = read_tree(&dark_path).unwrap();
        // case-only difference is not an override
        light["theme"]["accent"]["12"]["$value"] = json!("#AA000C");
        dark["theme"]["accent"]["7"]["$value"] = json!("#123456");
        write_json(&light_path, &light).unwrap();
        write_json(&dark_path, &dark).unwrap();

        let report = OverrideDifferencer::new(&fixture.config, &fixture.layout)
            .run()
            .unwrap();
        assert_eq!(report.themes[0].counts, vec![("accent".to_string(), 1)]);
        assert!(report.themes[1].counts.is_empty());

        let document: BuildConfig =
            serde_json::from_str(&std::fs::read_to_string(&report.path).unwrap()).unwrap();
        let accent = &document.themes["HI"].overrides.colors["accent"];
        assert!(!accent.contains_key("base-default"));
        assert_eq!(
            accent["border-subtle"],
            OverrideEntry {
                light: None,
                dark: Some("#da0007".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_legacy_path_is_reported() {
        let fixture = Fixture::new();
        fixture.restructure().unwrap();

        let mut light = legacy_scheme("a");
        light["HI"].as_object_mut().unwrap().remove("brand3");
        write_json(&fixture.layout.legacy_color_scheme(ColorMode::Light), &light).unwrap();

        let report = OverrideDifferencer::new(&fixture.config, &fixture.layout)
            .run()
            .unwrap();
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].theme, "HI");
        assert_eq!(report.missing[0].family, "brand3");
    }
}

// ABOUTME: Pure tree builders for every file the restructurer emits
// ABOUTME: Color-scheme primitives, theme alias files, the semantic layer and mode blocks

use std::path::Path;

use serde_json::{Map, Value};
use tokenweave_types::token::{self, leaf_value, lookup_group, rooted};
use tokenweave_types::{
    FamilyBinding, PipelineConfig, SemanticRole, Shade, ThemeConfig, Token, TokenPath, TokenTree,
};

use crate::error::{Result, TokenError};

/// Copy the 16 shades of a legacy family verbatim.
///
/// `file` is only used for error reporting.
pub fn family_shades(legacy: &TokenTree, source: &TokenPath, file: &Path) -> Result<TokenTree> {
    let family = lookup_group(legacy, source)
        .ok_or_else(|| TokenError::missing_token(file, source.as_str()))?;

    let mut shades = Map::new();
    for shade in Shade::all() {
        let key = shade.key();
        let leaf = family
            .get(&key)
            .ok_or_else(|| TokenError::missing_token(file, source.child(&key).as_str()))?;
        shades.insert(key, leaf.clone());
    }
    Ok(shades)
}

/// Literal `$value` of one shade of a legacy family
pub fn shade_value(
    legacy: &TokenTree,
    family: &TokenPath,
    shade: Shade,
    file: &Path,
) -> Result<Value> {
    let path = family.child(shade.key());
    token::lookup(legacy, &path)
        .and_then(leaf_value)
        .cloned()
        .ok_or_else(|| TokenError::missing_token(file, path.as_str()))
}

/// Primitive color-scheme tree for one theme in one mode:
/// `{ theme: { <families>, link: { visited }, focus: { inner, outer } } }`
pub fn color_scheme(
    config: &PipelineConfig,
    theme: &ThemeConfig,
    legacy: &TokenTree,
    file: &Path,
) -> Result<TokenTree> {
    let mut tree = Map::new();

    for FamilyBinding { name, source } in theme.bindings_with(&config.shared_families) {
        let shades = family_shades(legacy, source, file)?;
        tree.insert(name.clone(), Value::Object(shades));
    }

    let visited = shade_value(
        legacy,
        &config.link_visited.family,
        config.link_visited.shade,
        file,
    )?;
    tree.insert(
        "link".to_string(),
        group([("visited", Token::color(visited).into_value())]),
    );

    let focus_family = theme
        .bindings_with(&config.shared_families)
        .find(|binding| binding.name == config.focus.family)
        .ok_or_else(|| TokenError::missing_token(file, config.focus.family.as_str()))?;
    let inner = shade_value(legacy, &focus_family.source, config.focus.inner, file)?;
    let outer = shade_value(legacy, &focus_family.source, config.focus.outer, file)?;
    tree.insert(
        "focus".to_string(),
        group([
            ("inner", Token::color(inner).into_value()),
            ("outer", Token::color(outer).into_value()),
        ]),
    );

    Ok(rooted("theme", tree))
}

/// 16 leaves aliasing `{theme.<family>.<n>}`
pub fn theme_alias_block(family: &str) -> TokenTree {
    let base = TokenPath::from_segments(["theme", family]);
    Shade::all()
        .map(|shade| {
            let target = base.child(shade.key());
            (shade.key(), Token::color_alias(&target).into_value())
        })
        .collect()
}

/// Theme file: color aliases into the primitive `theme` root plus
/// typography and shape tokens carried over from the legacy theme file.
pub fn theme_file(config: &PipelineConfig, legacy_theme: &TokenTree) -> TokenTree {
    let mut color = Map::new();
    for family in config.all_families() {
        let block = theme_alias_block(&family);
        color.insert(family, Value::Object(block));
    }
    color.insert(
        "link".to_string(),
        group([("visited", alias("theme.link.visited"))]),
    );
    color.insert(
        "focus".to_string(),
        group([
            ("inner-color", alias("theme.focus.inner")),
            ("outer-color", alias("theme.focus.outer")),
        ]),
    );

    let mut tree = rooted("color", color);
    for key in &config.passthrough_keys {
        // absent or empty entries are omitted, never defaulted
        if let Some(value) = legacy_theme.get(key).filter(|v| is_present(v)) {
            tree.insert(key.clone(), value.clone());
        }
    }
    tree
}

/// 16 leaves named by the role table, each aliasing `{<prefix>.<n>}`
pub fn semantic_block(prefix: &TokenPath) -> TokenTree {
    SemanticRole::ALL
        .into_iter()
        .map(|role| {
            let target = prefix.child(role.shade().key());
            (
                role.as_str().to_string(),
                Token::color_alias(&target).into_value(),
            )
        })
        .collect()
}

/// Semantic color layer for every family plus focus and link aliases
pub fn semantic_color(config: &PipelineConfig) -> TokenTree {
    let mut color = Map::new();
    for family in config.all_families() {
        let block = semantic_block(&TokenPath::from_segments(["color", family.as_str()]));
        color.insert(family, Value::Object(block));
    }
    color.insert(
        "focus".to_string(),
        group([
            ("inner", alias("color.focus.inner-color")),
            ("outer", alias("color.focus.outer-color")),
        ]),
    );

    let mut tree = rooted("color", color);
    let link = rooted(
        "color",
        [("visited".to_string(), alias("color.link.visited"))]
            .into_iter()
            .collect(),
    );
    tree.insert("link".to_string(), Value::Object(link));
    tree
}

/// Mode block `{ color: { <outer_key>: { <role>: {color.<family>.<role>} } } }`
pub fn mode_block(outer_key: &str, family: &str) -> TokenTree {
    let base = TokenPath::from_segments(["color", family]);
    let roles: TokenTree = SemanticRole::ALL
        .into_iter()
        .map(|role| {
            let target = base.child(role.as_str());
            (
                role.as_str().to_string(),
                Token::color_alias(&target).into_value(),
            )
        })
        .collect();
    rooted("color", rooted(outer_key, roles))
}

fn alias(path: &str) -> Value {
    Token::color_alias(&TokenPath::new(path)).into_value()
}

fn group<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

/// Falsy values (null, false, zero, empty string) count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

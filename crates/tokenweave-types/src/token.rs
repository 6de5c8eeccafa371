// ABOUTME: Token tree data model shared by every pipeline stage
// ABOUTME: Leaf tokens, alias references and dotted-path lookup over JSON trees

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A token tree is a nested JSON object; insertion order is kept on write.
pub type TokenTree = Map<String, Value>;

/// `$type` used for color leaves
pub const COLOR_TYPE: &str = "color";

/// A leaf design token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "$type")]
    pub kind: String,
    #[serde(rename = "$value")]
    pub value: Value,
}

impl Token {
    /// Color leaf holding a literal value
    pub fn color(value: impl Into<Value>) -> Self {
        Self {
            kind: COLOR_TYPE.to_string(),
            value: value.into(),
        }
    }

    /// Color leaf whose value references another token
    pub fn color_alias(path: &TokenPath) -> Self {
        Self::color(path.to_alias())
    }

    pub fn into_value(self) -> Value {
        let mut leaf = Map::with_capacity(2);
        leaf.insert("$type".to_string(), Value::String(self.kind));
        leaf.insert("$value".to_string(), self.value);
        Value::Object(leaf)
    }
}

/// A dotted path into a token tree, e.g. `color.accent.12`.
///
/// Segments may contain spaces (`External.Mareano primary`) but never dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenPath(String);

impl TokenPath {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self(path.into())
    }

    /// Build a path from individual segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(".");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Append a segment, returning a new path
    pub fn child(&self, segment: impl AsRef<str>) -> Self {
        Self(format!("{}.{}", self.0, segment.as_ref()))
    }

    /// Alias reference form: `{a.b.c}`
    pub fn to_alias(&self) -> String {
        format!("{{{}}}", self.0)
    }

    /// Parse an alias reference, `None` for literal values
    pub fn from_alias(value: &str) -> Option<Self> {
        value
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|inner| !inner.is_empty())
            .map(Self::new)
    }
}

impl From<&str> for TokenPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for TokenPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a dotted path against a tree.
pub fn lookup<'a>(tree: &'a TokenTree, path: &TokenPath) -> Option<&'a Value> {
    let mut segments = path.segments();
    let first = segments.next()?;
    let mut node = tree.get(first)?;
    for segment in segments {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

/// Resolve a dotted path that must land on a nested group.
pub fn lookup_group<'a>(tree: &'a TokenTree, path: &TokenPath) -> Option<&'a TokenTree> {
    lookup(tree, path).and_then(Value::as_object)
}

/// `$value` of a leaf node, if the node is a leaf
pub fn leaf_value(node: &Value) -> Option<&Value> {
    node.as_object().and_then(|leaf| leaf.get("$value"))
}

/// Wrap a tree under a single root key
pub fn rooted(key: &str, tree: TokenTree) -> TokenTree {
    let mut root = Map::with_capacity(1);
    root.insert(key.to_string(), Value::Object(tree));
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_round_trip() {
        let path = TokenPath::from_segments(["color", "accent", "12"]);
        assert_eq!(path.to_alias(), "{color.accent.12}");
        assert_eq!(TokenPath::from_alias("{color.accent.12}"), Some(path));
        assert_eq!(TokenPath::from_alias("#abc123"), None);
        assert_eq!(TokenPath::from_alias("{}"), None);
    }

    #[test]
    fn test_token_serialises_with_dollar_keys() {
        let value = Token::color_alias(&TokenPath::new("theme.accent.1")).into_value();
        assert_eq!(value, json!({"$type": "color", "$value": "{theme.accent.1}"}));

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["$type", "$value"]);
    }

    #[test]
    fn test_lookup_with_spaced_segments() {
        let tree = json!({
            "External": {
                "Mareano primary": { "1": { "$type": "color", "$value": "#fff" } }
            }
        });
        let tree = tree.as_object().unwrap();

        let path = TokenPath::new("External.Mareano primary");
        let group = lookup_group(tree, &path).unwrap();
        assert_eq!(leaf_value(&group["1"]), Some(&json!("#fff")));

        assert!(lookup(tree, &TokenPath::new("External.missing")).is_none());
        assert!(lookup(tree, &TokenPath::new("External.Mareano primary.1.$value.x")).is_none());
    }
}

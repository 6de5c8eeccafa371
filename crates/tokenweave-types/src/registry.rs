// ABOUTME: Theme registry ($themes.json) and token-set manifest ($metadata.json) types
// ABOUTME: Entries outside the owned groups stay raw JSON so they survive a rebuild verbatim

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a token set participates in a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSetStatus {
    Enabled,
    Disabled,
    Source,
}

/// Registry groups rebuilt by the restructurer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeGroup {
    ColorScheme,
    Theme,
    Semantic,
    MainColor,
    SupportColor,
}

impl ThemeGroup {
    pub const OWNED: [ThemeGroup; 5] = [
        ThemeGroup::ColorScheme,
        ThemeGroup::Theme,
        ThemeGroup::Semantic,
        ThemeGroup::MainColor,
        ThemeGroup::SupportColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeGroup::ColorScheme => "Color scheme",
            ThemeGroup::Theme => "Theme",
            ThemeGroup::Semantic => "Semantic",
            ThemeGroup::MainColor => "Main color",
            ThemeGroup::SupportColor => "Support color",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::OWNED.into_iter().find(|group| group.as_str() == name)
    }

    /// Owned group of a raw registry entry, if its `group` names one
    pub fn of_entry(entry: &Value) -> Option<Self> {
        entry
            .get("group")
            .and_then(Value::as_str)
            .and_then(Self::from_name)
    }
}

/// A registry entry generated for one of the owned groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEntry {
    pub id: String,
    pub name: String,
    pub selected_token_sets: IndexMap<String, TokenSetStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ThemeEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        group: ThemeGroup,
        selected_token_sets: IndexMap<String, TokenSetStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            selected_token_sets,
            group: Some(group.as_str().to_string()),
        }
    }

    /// Whether this entry belongs to a group the restructurer rebuilds
    pub fn is_owned(&self) -> bool {
        self.group
            .as_deref()
            .and_then(ThemeGroup::from_name)
            .is_some()
    }
}

/// A written registry element: either carried over as read, or generated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegistryEntry {
    Kept(Value),
    Generated(ThemeEntry),
}

impl RegistryEntry {
    pub fn id(&self) -> Option<&str> {
        match self {
            RegistryEntry::Kept(value) => value.get("id").and_then(Value::as_str),
            RegistryEntry::Generated(entry) => Some(&entry.id),
        }
    }
}

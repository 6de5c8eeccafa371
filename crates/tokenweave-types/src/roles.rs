// ABOUTME: Shade indices and the positional semantic role table
// ABOUTME: Binds each of the 16 shades of a color family to one purpose-based role name

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of shades in every color family.
pub const SHADE_COUNT: u8 = 16;

/// One of the 16 positionally ordered shades of a color family (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Shade(u8);

impl Shade {
    /// Create a shade from its 1-based index, `None` when out of range
    pub fn new(index: u8) -> Option<Self> {
        (1..=SHADE_COUNT).contains(&index).then_some(Self(index))
    }

    /// Iterate all shades in ascending order
    pub fn all() -> impl Iterator<Item = Shade> {
        (1..=SHADE_COUNT).map(Shade)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Key used for this shade inside a token tree (`"1"`..`"16"`)
    pub fn key(self) -> String {
        self.0.to_string()
    }

    /// Semantic role bound to this position
    pub fn role(self) -> SemanticRole {
        SemanticRole::ALL[usize::from(self.0 - 1)]
    }
}

impl TryFrom<u8> for Shade {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Shade::new(index)
            .ok_or_else(|| format!("shade must be within 1..={SHADE_COUNT}, got {index}"))
    }
}

impl From<Shade> for u8 {
    fn from(shade: Shade) -> Self {
        shade.0
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Purpose-based name of a shade.
///
/// The variant order is the positional binding: the n-th variant is shade n in
/// every color family of every theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticRole {
    BackgroundDefault,
    BackgroundTinted,
    SurfaceDefault,
    SurfaceTinted,
    SurfaceHover,
    SurfaceActive,
    BorderSubtle,
    BorderDefault,
    BorderStrong,
    TextSubtle,
    TextDefault,
    BaseDefault,
    BaseHover,
    BaseActive,
    BaseContrastSubtle,
    BaseContrastDefault,
}

impl SemanticRole {
    pub const ALL: [SemanticRole; SHADE_COUNT as usize] = [
        SemanticRole::BackgroundDefault,
        SemanticRole::BackgroundTinted,
        SemanticRole::SurfaceDefault,
        SemanticRole::SurfaceTinted,
        SemanticRole::SurfaceHover,
        SemanticRole::SurfaceActive,
        SemanticRole::BorderSubtle,
        SemanticRole::BorderDefault,
        SemanticRole::BorderStrong,
        SemanticRole::TextSubtle,
        SemanticRole::TextDefault,
        SemanticRole::BaseDefault,
        SemanticRole::BaseHover,
        SemanticRole::BaseActive,
        SemanticRole::BaseContrastSubtle,
        SemanticRole::BaseContrastDefault,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SemanticRole::BackgroundDefault => "background-default",
            SemanticRole::BackgroundTinted => "background-tinted",
            SemanticRole::SurfaceDefault => "surface-default",
            SemanticRole::SurfaceTinted => "surface-tinted",
            SemanticRole::SurfaceHover => "surface-hover",
            SemanticRole::SurfaceActive => "surface-active",
            SemanticRole::BorderSubtle => "border-subtle",
            SemanticRole::BorderDefault => "border-default",
            SemanticRole::BorderStrong => "border-strong",
            SemanticRole::TextSubtle => "text-subtle",
            SemanticRole::TextDefault => "text-default",
            SemanticRole::BaseDefault => "base-default",
            SemanticRole::BaseHover => "base-hover",
            SemanticRole::BaseActive => "base-active",
            SemanticRole::BaseContrastSubtle => "base-contrast-subtle",
            SemanticRole::BaseContrastDefault => "base-contrast-default",
        }
    }

    /// Shade this role is bound to
    pub fn shade(self) -> Shade {
        // ALL is ordered by discriminant
        Shade(self as u8 + 1)
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

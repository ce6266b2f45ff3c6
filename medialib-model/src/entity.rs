use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Listable collections that support keyset pagination.
///
/// The discriminant is embedded in pagination tokens so a token minted for
/// one collection is never accepted by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum EntityKind {
    Files = 1,
    Tags = 2,
    ApiKeys = 3,
    Presets = 4,
    Lists = 5,
    Sources = 6,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Files,
        EntityKind::Tags,
        EntityKind::ApiKeys,
        EntityKind::Presets,
        EntityKind::Lists,
        EntityKind::Sources,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_u8() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Files => "files",
            EntityKind::Tags => "tags",
            EntityKind::ApiKeys => "api-keys",
            EntityKind::Presets => "presets",
            EntityKind::Lists => "lists",
            EntityKind::Sources => "sources",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityKind(pub String);

impl Display for UnknownEntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEntityKind {}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

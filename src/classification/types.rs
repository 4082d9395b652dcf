//! Core classification types

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque industry classification id (e.g. a NAICS id)
///
/// Reference files are inconsistent about the JSON type of ids: the API
/// returns strings while the static layout stores integers. Both forms
/// deserialize to the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct IndustryId(String);

impl IndustryId {
    pub fn new(id: impl Into<String>) -> Self {
        IndustryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndustryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IndustryId {
    fn from(s: String) -> Self {
        IndustryId(s)
    }
}

impl From<&str> for IndustryId {
    fn from(s: &str) -> Self {
        IndustryId(s.to_string())
    }
}

impl From<u64> for IndustryId {
    fn from(id: u64) -> Self {
        IndustryId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for IndustryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => IndustryId(s),
            RawId::Number(n) => IndustryId(n.to_string()),
        })
    }
}

/// Digit level was outside `1..=6`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid digit level: {0}")]
pub struct InvalidDigitLevel(pub String);

/// Granularity of the classification hierarchy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub enum DigitLevel {
    Sector = 1,
    Two = 2,
    #[default]
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
}

impl DigitLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for DigitLevel {
    type Error = InvalidDigitLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DigitLevel::Sector),
            2 => Ok(DigitLevel::Two),
            3 => Ok(DigitLevel::Three),
            4 => Ok(DigitLevel::Four),
            5 => Ok(DigitLevel::Five),
            6 => Ok(DigitLevel::Six),
            other => Err(InvalidDigitLevel(other.to_string())),
        }
    }
}

impl From<DigitLevel> for u8 {
    fn from(level: DigitLevel) -> Self {
        level.as_u8()
    }
}

impl FromStr for DigitLevel {
    type Err = InvalidDigitLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("sector") {
            return Ok(DigitLevel::Sector);
        }
        trimmed
            .parse::<u8>()
            .map_err(|_| InvalidDigitLevel(trimmed.to_string()))
            .and_then(DigitLevel::try_from)
    }
}

impl fmt::Display for DigitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigitLevel::Sector => write!(f, "sector"),
            other => write!(f, "{}-digit", other.as_u8()),
        }
    }
}

/// One entry of the classification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryClassification {
    pub id: IndustryId,
    #[serde(default)]
    pub name: Option<String>,
    pub level: DigitLevel,
    /// Ancestor at sector level; equals `id` for sectors
    pub top_level_parent_id: IndustryId,
    #[serde(default)]
    pub parent_id: Option<IndustryId>,
    #[serde(default)]
    pub code: Option<String>,
}

impl IndustryClassification {
    /// Display name; absent names render as the empty string
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_sector(&self) -> bool {
        self.level == DigitLevel::Sector
    }
}

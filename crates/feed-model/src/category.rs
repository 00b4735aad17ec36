//! Product line enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the three inventory exports that make up the feed.
///
/// Declaration order is feed order: natural rows are emitted first, then
/// lab-grown, then gemstones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Natural,
    LabGrown,
    Gemstone,
}

impl Category {
    /// All categories in feed order.
    pub const ALL: [Category; 3] = [Category::Natural, Category::LabGrown, Category::Gemstone];

    /// Stable snake_case key (`natural`, `lab_grown`, `gemstone`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::LabGrown => "lab_grown",
            Self::Gemstone => "gemstone",
        }
    }

    /// Human-readable label for summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Natural => "Natural diamonds",
            Self::LabGrown => "Lab-grown diamonds",
            Self::Gemstone => "Gemstones",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "natural" => Ok(Self::Natural),
            "lab_grown" | "labgrown" => Ok(Self::LabGrown),
            "gemstone" | "gemstones" => Ok(Self::Gemstone),
            _ => Err(ModelError::UnknownCategory(value.to_string())),
        }
    }
}

//! Campus zone enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Campus areas a slot can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Main gate parking area.
    Gate,
    /// Canteen-side parking area.
    Canteen,
    /// Skill hub parking area.
    SkillHub,
}

impl Zone {
    /// Return the zone as its storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gate => "gate",
            Self::Canteen => "canteen",
            Self::SkillHub => "skill_hub",
        }
    }

    /// All zones in a fixed order, used when spreading seeded slots.
    pub fn all() -> [Zone; 3] {
        [Zone::Canteen, Zone::SkillHub, Zone::Gate]
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Zone {
    type Err = parkhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gate" => Ok(Self::Gate),
            "canteen" => Ok(Self::Canteen),
            "skill_hub" => Ok(Self::SkillHub),
            _ => Err(parkhub_core::AppError::validation(format!(
                "Invalid zone: '{s}'. Expected one of: gate, canteen, skill_hub"
            ))),
        }
    }
}

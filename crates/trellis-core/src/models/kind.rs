//! Plan kind descriptor selecting the badge rules for a plan.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan kinds.
///
/// The engine is generic over the kind of plan being tracked; the kind only
/// decides which specialty tag and badge the achievement rules look for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    /// Agricultural planting plan
    #[default]
    Planting,

    /// Generic learning path
    Learning,
}

impl FromStr for PlanKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planting" => Ok(PlanKind::Planting),
            "learning" => Ok(PlanKind::Learning),
            _ => Err(format!("Invalid plan kind: {s}")),
        }
    }
}

impl PlanKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Planting => "planting",
            PlanKind::Learning => "learning",
        }
    }

    /// Tag that qualifies a fully completed plan for the kind-specific badge.
    pub fn specialty_tag(&self) -> &'static str {
        match self {
            PlanKind::Planting => "coffee",
            PlanKind::Learning => "programming",
        }
    }

    /// Badge granted when a plan carrying the specialty tag is completed.
    pub fn specialty_badge(&self) -> &'static str {
        match self {
            PlanKind::Planting => "COFFEE_GROWER",
            PlanKind::Learning => "CODING_EXPERT",
        }
    }
}

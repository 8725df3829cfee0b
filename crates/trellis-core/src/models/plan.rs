//! Plan and milestone model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanKind;

/// Represents a complete plan with metadata, tags, and milestones.
///
/// Plans are read-only to the progress engine: it resolves them to learn the
/// milestone set and tag set, never to mutate them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Kind of plan (planting plan or learning path)
    #[serde(default)]
    pub kind: PlanKind,

    /// Title of the plan
    pub title: String,

    /// Detailed multi-line description of the plan
    pub description: Option<String>,

    /// ID of the user who authored the plan
    pub owner_id: String,

    /// Whether the plan is visible to other users
    #[serde(default = "default_public")]
    pub public: bool,

    /// Free-form tags (e.g. "coffee", "programming")
    #[serde(default)]
    pub tags: Vec<String>,

    /// Like counter
    #[serde(default)]
    pub likes: u32,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Ordered milestones (by order index)
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

fn default_public() -> bool {
    true
}

impl Plan {
    /// Milestone IDs in plan order.
    pub fn milestone_ids(&self) -> Vec<u64> {
        self.milestones.iter().map(|m| m.id).collect()
    }
}

/// Represents an individual milestone within a plan.
///
/// Milestone IDs are durable: assigned once at creation and never reused,
/// so completed-milestone entries stay meaningful even after a milestone is
/// removed from its plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    /// Unique identifier for the milestone
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// Brief title of the milestone
    pub title: String,

    /// Detailed multi-line description of the milestone
    pub description: Option<String>,

    /// Order of the milestone within the plan (0-indexed)
    pub order: u32,
}

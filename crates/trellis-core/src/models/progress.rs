//! Progress record model and percentage derivation.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Per-user, per-plan tracking of completed milestones and derived state.
///
/// At most one record exists per `(user_id, plan_id)` pair. The completion
/// percentage is a pure function of the completed set and the plan's current
/// milestone list; it is stored for query convenience but recomputed on every
/// mutation rather than trusted from input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRecord {
    /// Unique identifier for the progress record
    pub id: u64,

    /// ID of the user working through the plan
    pub user_id: String,

    /// ID of the referenced plan
    pub plan_id: u64,

    /// Derived completion percentage (0-100, exact fractional values kept)
    pub percent_complete: f64,

    /// Timestamp when the user began the plan (set once, never overwritten)
    pub started_at: Timestamp,

    /// Timestamp of the most recent mutation
    pub last_updated_at: Timestamp,

    /// Completed milestones, ordered by completion time
    #[serde(default)]
    pub completed_milestones: Vec<CompletedMilestone>,

    /// Badges awarded to this record; append-only, membership unique
    #[serde(default)]
    pub badges: Vec<String>,

    /// Like counter
    #[serde(default)]
    pub likes: u32,
}

impl ProgressRecord {
    /// Whether the given milestone ID is already in the completed set.
    pub fn has_completed(&self, milestone_id: u64) -> bool {
        self.completed_milestones
            .iter()
            .any(|cm| cm.milestone_id == milestone_id)
    }

    /// Whether the given badge has already been awarded to this record.
    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|b| b == badge)
    }

    /// Derive the completion percentage against a plan's milestone IDs.
    ///
    /// Only completed entries whose milestone ID still exists on the plan are
    /// counted, so records drifted by milestone removal converge back into
    /// the 0-100 range on recompute. A plan with no milestones yields 0,
    /// never an error and never NaN.
    pub fn percentage_against(&self, milestone_ids: &[u64]) -> f64 {
        if milestone_ids.is_empty() {
            return 0.0;
        }

        let completed = self
            .completed_milestones
            .iter()
            .filter(|cm| milestone_ids.contains(&cm.milestone_id))
            .count();

        (completed as f64 / milestone_ids.len() as f64) * 100.0
    }
}

/// A single completed-milestone entry on a progress record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedMilestone {
    /// ID of the completed milestone
    pub milestone_id: u64,

    /// Timestamp when the milestone was completed (UTC)
    pub completed_at: Timestamp,

    /// Optional free-text note recorded at completion
    pub note: Option<String>,

    /// Media references (URLs) attached to the completion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_refs: Vec<String>,
}

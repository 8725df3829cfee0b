//! Parameter structures for Trellis operations
//!
//! Shared parameter structures used across interfaces (CLI and any future
//! surface) without framework-specific derives. Interface layers wrap these
//! with their own derives (e.g. clap `Args`) and convert via `From`, keeping
//! core domain logic independent of UI frameworks.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like get_progress, delete_progress, like_progress,
/// refresh_percentage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Generic parameters for operations scoped to a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserId {
    /// The ID of the user to operate on
    pub user_id: String,
}

/// Parameters for registering a new plan in the plan store.
///
/// Milestones are authored inline in plan order; each receives a durable ID
/// at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Kind of plan ('planting' or 'learning')
    pub kind: String,
    /// Title of the plan (required)
    pub title: String,
    /// Optional detailed description of the plan
    pub description: Option<String>,
    /// ID of the authoring user
    pub owner_id: String,
    /// Free-form tags attached to the plan
    #[serde(default)]
    pub tags: Vec<String>,
    /// Milestone titles, in plan order
    #[serde(default)]
    pub milestones: Vec<String>,
}

/// Parameters for starting a progress record against a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProgress {
    /// ID of the user beginning the plan
    pub user_id: String,
    /// ID of the plan to track
    pub plan_id: u64,
    /// Optional explicit start time; defaults to now
    pub started_at: Option<Timestamp>,
}

/// Parameters for looking up the progress record of a user on a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPlanQuery {
    /// ID of the user
    pub user_id: String,
    /// ID of the plan
    pub plan_id: u64,
}

/// Parameters for recording a milestone completion.
///
/// Completion is idempotent: if the milestone ID is already in the record's
/// completed set the operation is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteMilestone {
    /// ID of the progress record to mutate
    pub progress_id: u64,
    /// ID of the milestone being completed
    pub milestone_id: u64,
    /// Optional explicit completion time; defaults to now
    pub completed_at: Option<Timestamp>,
    /// Optional free-text note
    pub note: Option<String>,
    /// Media references (URLs) attached to the completion
    #[serde(default)]
    pub media_refs: Vec<String>,
}

/// Parameters for a direct badge grant, bypassing rule evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwardBadge {
    /// ID of the progress record to grant the badge on
    pub progress_id: u64,
    /// Badge name (opaque string, not validated against a closed set)
    pub badge: String,
}

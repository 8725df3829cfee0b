//! Core library for the Trellis progress and achievement engine.
//!
//! This crate provides the business logic for tracking per-user progress
//! through plans with ordered milestones: database operations, data models,
//! the achievement rule engine, and error handling.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for
//!   direct formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting for collections and operation results
//!
//! This separation allows the same data to be formatted differently depending
//! on context (lists vs. individual items, creation results vs. completion
//! outcomes) while maintaining consistency across all output.
//!
//! # Quick Start
//!
//! ```rust
//! use trellis_core::{
//!     params::{CompleteMilestone, CreatePlan, CreateProgress},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Register a plan with milestones
//! let plan = tracker
//!     .create_plan(&CreatePlan {
//!         kind: "planting".to_string(),
//!         title: "Grow coffee".to_string(),
//!         description: None,
//!         owner_id: "alice".to_string(),
//!         tags: vec!["coffee".to_string()],
//!         milestones: vec!["Germinate".to_string(), "Harvest".to_string()],
//!     })
//!     .await?;
//!
//! // Start tracking it and complete the first milestone
//! let record = tracker
//!     .create_progress(&CreateProgress {
//!         user_id: "alice".to_string(),
//!         plan_id: plan.id,
//!         started_at: None,
//!     })
//!     .await?;
//!
//! let update = tracker
//!     .complete_milestone(&CompleteMilestone {
//!         progress_id: record.id,
//!         milestone_id: plan.milestones[0].id,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{:.1}% complete", update.record.percent_complete);
//! # Ok(())
//! # }
//! ```

pub mod achievements;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod tracker;

// Re-export commonly used types
pub use db::{progress_queries::ProgressUpdate, Database};
pub use display::{
    Badges, CompletionResult, CreateResult, DeleteResult, LocalDateTime, ProgressRecords,
};
pub use error::{Result, TrackerError};
pub use models::{CompletedMilestone, Milestone, Plan, PlanKind, ProgressRecord};
pub use params::{
    AwardBadge, CompleteMilestone, CreatePlan, CreateProgress, Id, UserId, UserPlanQuery,
};
pub use tracker::{Tracker, TrackerBuilder};

//! Data models for plans, milestones, and progress records.
//!
//! This module contains the core domain models of the Trellis progress
//! tracking system. Display implementations for these models live in
//! [`crate::display::models`] to keep data structures and presentation
//! logic separate.
//!
//! A [`Plan`] is an ordered collection of [`Milestone`]s a user works
//! through; its [`PlanKind`] selects the specialty badge rules that apply.
//! A [`ProgressRecord`] tracks one user's completion state against one plan:
//! which milestones are done, the derived completion percentage, and the
//! badges awarded so far. The percentage is never authored by callers; it is
//! recomputed from the completed set on every mutation.

pub mod kind;
pub mod plan;
pub mod progress;


// Re-export all public types at the models level
pub use kind::PlanKind;
pub use plan::{Milestone, Plan};
pub use progress::{CompletedMilestone, ProgressRecord};

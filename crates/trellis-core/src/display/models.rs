//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so persistence and presentation do
//! not mix. Output is markdown-flavored for terminal display.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{CompletedMilestone, Milestone, Plan, PlanKind, ProgressRecord};

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Kind: {}", self.kind.as_str())?;
        writeln!(f, "- Owner: {}", self.owner_id)?;
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }
        writeln!(f, "- Likes: {}", self.likes)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.milestones.is_empty() {
            writeln!(f, "\n## Milestones")?;
            writeln!(f)?;
            for milestone in &self.milestones {
                write!(f, "{milestone}")?;
            }
        } else {
            writeln!(f, "\nNo milestones in this plan.")?;
        }

        Ok(())
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {} (ID: {})", self.order + 1, self.title, self.id)?;
        if let Some(desc) = &self.description {
            writeln!(f, "   {desc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProgressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# Progress {} (user {}, plan {})",
            self.id, self.user_id, self.plan_id
        )?;
        writeln!(f)?;

        writeln!(f, "- Completion: {:.1}%", self.percent_complete)?;
        writeln!(f, "- Likes: {}", self.likes)?;
        writeln!(f, "- Started: {}", LocalDateTime(&self.started_at))?;
        writeln!(f, "- Last activity: {}", LocalDateTime(&self.last_updated_at))?;

        if !self.badges.is_empty() {
            writeln!(f, "- Badges: {}", self.badges.join(", "))?;
        }

        if !self.completed_milestones.is_empty() {
            writeln!(f, "\n## Completed milestones")?;
            writeln!(f)?;
            for entry in &self.completed_milestones {
                write!(f, "{entry}")?;
            }
        } else {
            writeln!(f, "\nNo milestones completed yet.")?;
        }

        Ok(())
    }
}

impl fmt::Display for CompletedMilestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- Milestone {} at {}",
            self.milestone_id,
            LocalDateTime(&self.completed_at)
        )?;
        if let Some(note) = &self.note {
            writeln!(f, "  Note: {note}")?;
        }
        for media_ref in &self.media_refs {
            writeln!(f, "  Media: {media_ref}")?;
        }
        Ok(())
    }
}

//! Achievement engine operations: milestone completion, percentage refresh,
//! badge grants, and likes.

use tokio::task;

use super::Tracker;
use crate::{
    db::{progress_queries::ProgressUpdate, Database},
    error::{Result, TrackerError},
    models::ProgressRecord,
    params::{AwardBadge, CompleteMilestone, Id, UserId},
};

impl Tracker {
    /// Records a milestone completion on a progress record.
    ///
    /// Idempotent: completing a milestone already in the record's completed
    /// set is a full no-op. A fresh completion recomputes the percentage and
    /// grants any newly qualifying badges.
    pub async fn complete_milestone(&self, params: &CompleteMilestone) -> Result<ProgressUpdate> {
        let db_path = self.db_path.clone();
        let progress_id = params.progress_id;
        let milestone_id = params.milestone_id;
        let completed_at = params.completed_at;
        let note = params.note.clone();
        let media_refs = params.media_refs.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.complete_milestone(
                progress_id,
                milestone_id,
                completed_at,
                note.as_deref(),
                &media_refs,
            )
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Recomputes a record's percentage from the plan's current milestone
    /// list and runs achievement rule evaluation on the result.
    pub async fn refresh_percentage(&self, params: &Id) -> Result<ProgressUpdate> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.refresh_percentage(id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Grants a badge directly, bypassing rule evaluation. Granting a badge
    /// the record already holds is a no-op.
    pub async fn award_badge(&self, params: &AwardBadge) -> Result<ProgressRecord> {
        let db_path = self.db_path.clone();
        let progress_id = params.progress_id;
        let badge = params.badge.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.award_badge(progress_id, &badge)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Increments the like counter on a progress record.
    pub async fn like_progress(&self, params: &Id) -> Result<ProgressRecord> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.like_progress(id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists the badges on a user's profile, in grant order.
    pub async fn user_badges(&self, params: &UserId) -> Result<Vec<String>> {
        let db_path = self.db_path.clone();
        let user_id = params.user_id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.user_badges(&user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
